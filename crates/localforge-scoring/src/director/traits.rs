// Score director trait definition.

use localforge_core::PlanningSolution;

// The score director manages solution state and score calculation.
//
// It is responsible for:
// - Owning the working solution
// - Calculating scores (incrementally when possible)
// - Being notified about variable changes for incremental updates
// - Replicating itself for move evaluation threads
//
// A director is never shared between threads; it is moved into the thread
// that owns it.
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    //
    // Every planning variable change made through this reference must be
    // wrapped in before/after_variable_changed. Use set_working_solution
    // for any other modification.
    fn working_solution_mut(&mut self) -> &mut S;

    // Replaces the working solution and resets all cached state.
    fn set_working_solution(&mut self, solution: S);

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Calculates the score of the working solution without touching any
    // incremental state. Used to verify the incremental score.
    fn calculate_score_from_scratch(&self) -> S::Score;

    // Clones the working solution.
    fn clone_working_solution(&self) -> S {
        self.working_solution().clone()
    }

    // Called before a planning variable is changed.
    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    // Called after a planning variable is changed.
    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    // Number of score calculations performed since creation.
    fn calculation_count(&self) -> u64;

    // Creates an independent replica for a move evaluation thread.
    //
    // The replica starts from a clone of the current working solution and
    // shares no mutable state with this director.
    fn create_child_thread(&self) -> Self
    where
        Self: Sized;
}
