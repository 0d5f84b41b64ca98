use crate::common::{close, TestHarness};
use mmn_core::{ErlangC, Expectation, SimConfig};

#[test]
fn test_single_server_closed_form() {
    for (ia, st) in [(2.0, 1.0), (5.0, 1.0), (1.0, 0.9), (3.0, 2.5)] {
        let r = ErlangC::compute(ia, st, 1);
        let rho: f64 = st / ia;
        let lq = r.expected_queue_length.value().unwrap();
        let wq = r.expected_queue_wait.value().unwrap();

        assert!(close(lq, rho * rho / (1.0 - rho), 1e-9), "Lq {} at rho {}", lq, rho);
        assert!(
            close(wq, rho / (1.0 / st) / (1.0 - rho), 1e-9),
            "Wq {} at rho {}",
            wq,
            rho
        );
        assert_eq!(r.expected_utilization, rho);
    }

    let r = ErlangC::compute(2.0, 1.0, 1);
    assert!(close(r.expected_queue_length.value().unwrap(), 0.5, 1e-12));
}

#[test]
fn test_stable_versus_unstable_three_servers() {
    let stable = ErlangC::compute(2.0, 3.0, 3);
    assert_eq!(stable.offered_load, 1.5);
    assert_eq!(stable.rho, 0.5);
    assert!(stable.is_stable());
    assert!(matches!(stable.expected_queue_length, Expectation::Finite(v) if v > 0.0));

    let unstable = ErlangC::compute(0.5, 3.0, 3);
    assert_eq!(unstable.offered_load, 6.0);
    assert_eq!(unstable.rho, 2.0);
    assert_eq!(unstable.expected_utilization, 1.0);
    assert_eq!(unstable.expected_queue_length, Expectation::Unbounded);
    assert_eq!(unstable.expected_queue_wait, Expectation::Unbounded);
    assert_eq!(unstable.expected_time_in_system, Expectation::Unbounded);
}

#[test]
fn test_exactly_saturated_is_unbounded() {
    let r = ErlangC::compute(1.0, 2.0, 2);
    assert_eq!(r.rho, 1.0);
    assert!(r.expected_queue_length.is_unbounded());
}

#[test]
fn test_more_servers_shorten_the_queue() {
    let lq = |n| ErlangC::compute(1.0, 3.0, n).expected_queue_length.value().unwrap();
    assert!(lq(4) > lq(5));
    assert!(lq(5) > lq(10));
    assert!(lq(10) < 1e-3);
}

#[test]
fn test_simulation_tracks_parameter_changes() {
    let mut h = TestHarness::new(SimConfig::new(3, 2.0, 3.0).with_seed(1));
    assert!(h.sim.theory().is_stable());

    h.sim.set_mean_interarrival_time(0.5).unwrap();
    assert_eq!(h.sim.theory().expected_utilization, 1.0);
    assert!(h.sim.theory().expected_queue_wait.is_unbounded());

    h.sim.set_mean_service_time(0.75).unwrap();
    assert_eq!(h.sim.theory().rho, 0.5);
    assert_eq!(
        h.sim.theory(),
        &ErlangC::compute(0.5, 0.75, 3),
        "cached result must match a fresh evaluation"
    );
}
