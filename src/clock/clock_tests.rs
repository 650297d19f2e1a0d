/*
 * Unit tests for clock module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_clock_interval_from_config
 *  - test_clock_runs_tick_count
 *  - test_clock_stop_simulation
 *  - test_clock_forwards_submissions
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod clock_tests {
    use crate::clock::Clock;
    use crate::config::Config;
    use crate::dispatcher::Dispatcher;
    use std::time::Duration;

    fn setup_clock(tick_interval_ms: u64) -> (Clock, Dispatcher) {
        let mut config = Config::test_config(6, 2, 8, 680.0);
        config.simulation.tick_interval_ms = tick_interval_ms;
        let dispatcher = Dispatcher::new(&config).unwrap();
        (Clock::new(&config.simulation), dispatcher)
    }

    #[test]
    fn test_clock_interval_from_config() {
        // Arrange
        let (clock, _dispatcher) = setup_clock(250);

        // Assert
        assert_eq!(clock.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_clock_runs_tick_count() {
        // Purpose: Verify that a bounded run performs exactly the requested number of ticks

        // Arrange
        let (clock, dispatcher) = setup_clock(1);

        // Act
        let (handle, status_rx) = clock.start_simulation(dispatcher, Some(5)).unwrap();
        let dispatcher = handle.wait();
        let ticks: Vec<u64> = status_rx.try_iter().map(|status| status.tick).collect();

        // Assert
        assert_eq!(dispatcher.current_tick(), 5);
        assert_eq!(ticks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clock_stop_simulation() {
        // Arrange
        let (clock, dispatcher) = setup_clock(1);
        let (handle, status_rx) = clock.start_simulation(dispatcher, None).unwrap();

        // Act
        match status_rx.recv_timeout(Duration::from_secs(3)) {
            Ok(status) => assert_eq!(status.tick, 1),
            Err(e) => panic!("Error receiving from status_rx: {:?}", e),
        }
        let dispatcher = handle.stop_simulation();
        let remaining = status_rx.try_iter().count() as u64;

        // Assert
        assert!(dispatcher.current_tick() >= 1);
        assert_eq!(remaining + 1, dispatcher.current_tick());
    }

    #[test]
    fn test_clock_forwards_submissions() {
        // Purpose: Submissions sent through the handle reach the dispatcher, rejections are dropped

        // Arrange
        let (clock, dispatcher) = setup_clock(10_000);
        let (handle, _status_rx) = clock.start_simulation(dispatcher, None).unwrap();

        // Act
        handle.submit_request(1, 3, 90.0);
        handle.submit_default(2, 5);
        handle.submit_request(2, 2, 70.0);
        let dispatcher = handle.stop_simulation();

        // Assert
        assert_eq!(dispatcher.current_tick(), 0);
        assert_eq!(dispatcher.pending().summary(), vec!["1->3", "2->5"]);
        let weights: Vec<f64> = dispatcher
            .pending()
            .iter()
            .map(|entry| entry.request.weight)
            .collect();
        assert_eq!(weights, vec![90.0, dispatcher.default_weight()]);
    }
}
