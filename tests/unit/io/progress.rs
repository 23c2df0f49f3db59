//! Tests for generation progress display

#[cfg(test)]
mod tests {
    use cellmaze::io::configuration::PROGRESS_REDRAW_STEPS;
    use cellmaze::io::progress::{ProgressManager, step_bound};

    // Tests the bar length covers the longest possible generation
    // Verified by dropping the finishing step from step_bound
    #[test]
    fn test_step_bound() {
        assert_eq!(step_bound(1), 1);
        assert_eq!(step_bound(30), 59);
        assert_eq!(step_bound(0), 0);
    }

    // Tests the manager accepts updates past its bound and finishes cleanly
    #[test]
    fn test_progress_manager_lifecycle() {
        let pm = ProgressManager::new("unconstrained", 4);
        pm.update_steps(0);
        pm.update_steps(PROGRESS_REDRAW_STEPS);
        pm.update_steps(PROGRESS_REDRAW_STEPS * 3);
        pm.finish(7);
    }
}
