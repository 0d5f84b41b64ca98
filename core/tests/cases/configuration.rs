use crate::common::{ScriptedVariates, TestHarness};
use mmn_core::{ConfigError, SimConfig, Simulation};
use std::rc::Rc;

#[test]
fn test_server_count_bounds() {
    for n in [0, 11, 100] {
        let err = Simulation::new(SimConfig::new(n, 1.0, 1.0)).err();
        assert_eq!(err, Some(ConfigError::ServerCount(n)));
    }
    for n in [1, 10] {
        assert!(Simulation::new(SimConfig::new(n, 1.0, 1.0)).is_ok());
    }
}

#[test]
fn test_non_positive_parameters_rejected() {
    assert!(matches!(
        SimConfig::new(1, 0.0, 1.0).validate(),
        Err(ConfigError::MeanInterarrivalTime(_))
    ));
    assert!(matches!(
        SimConfig::new(1, 1.0, -2.0).validate(),
        Err(ConfigError::MeanServiceTime(_))
    ));
    assert!(matches!(
        SimConfig::new(1, f64::NAN, 1.0).validate(),
        Err(ConfigError::MeanInterarrivalTime(_))
    ));
    assert!(matches!(
        SimConfig::new(1, 1.0, 1.0).with_run_time(0.0).validate(),
        Err(ConfigError::MaxRunTime(_))
    ));
    assert!(matches!(
        SimConfig::new(1, 1.0, 1.0).with_run_time(f64::INFINITY).validate(),
        Err(ConfigError::MaxRunTime(_))
    ));
    assert!(matches!(
        SimConfig::new(1, 1.0, 1.0).with_reset_time(-1.0).validate(),
        Err(ConfigError::StatsResetTime(_))
    ));
    assert!(SimConfig::new(1, 1.0, 1.0).with_reset_time(0.0).validate().is_ok());
}

#[test]
fn test_error_messages_name_the_parameter() {
    let msg = ConfigError::ServerCount(12).to_string();
    assert!(msg.contains("server_count") && msg.contains("12"), "{}", msg);
    let msg = ConfigError::MeanServiceTime(-1.0).to_string();
    assert!(msg.contains("mean_service_time"), "{}", msg);
}

#[test]
fn test_failed_setup_leaves_state_untouched() {
    let mut h = TestHarness::new(SimConfig::new(2, 1.0, 1.5).with_seed(6));
    h.sim.run_until(40.0);
    let before = h.sim.snapshot();

    let result = h.sim.setup(SimConfig::new(0, 1.0, 1.0));
    assert_eq!(result, Err(ConfigError::ServerCount(0)));
    assert_eq!(h.sim.snapshot(), before);
}

#[test]
fn test_setup_clears_state() {
    let mut h = TestHarness::new(SimConfig::new(2, 1.0, 1.5).with_seed(6));
    h.sim.run_until(40.0);

    h.sim.setup(SimConfig::new(4, 2.0, 1.0).with_seed(6)).unwrap();
    assert_eq!(h.sim.clock(), 0.0);
    assert_eq!(h.sim.servers().len(), 4);
    assert_eq!(h.sim.customers_in_system(), 0);
    assert_eq!(h.sim.customers_arrived(), 0);
    assert!(h.sim.next_arrival_time() > 0.0);
    assert_eq!(h.sim.statistics().total_system_throughput, 0);
}

#[test]
fn test_rejected_mean_change_keeps_old_value() {
    let mut h = TestHarness::new(SimConfig::new(1, 2.0, 1.0).with_seed(1));
    assert!(h.sim.set_mean_service_time(0.0).is_err());
    assert!(h.sim.set_mean_interarrival_time(-3.0).is_err());
    assert_eq!(h.sim.config().mean_service_time, 1.0);
    assert_eq!(h.sim.config().mean_interarrival_time, 2.0);
}

#[test]
fn test_partial_json_uses_defaults() {
    let config: SimConfig =
        serde_json::from_str(r#"{ "server_count": 2, "seed": 9 }"#).unwrap();
    assert_eq!(config.server_count, 2);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.mean_service_time, SimConfig::default().mean_service_time);
    assert!(config.validate().is_ok());
}

#[test]
fn test_setup_keeps_injected_source() {
    let config = SimConfig::new(1, 1.0, 1.0).with_reset_time(0.0);
    let script = ScriptedVariates::new(&[3.0, 4.0]);
    let calls = Rc::clone(&script.calls);
    let mut h = TestHarness::scripted(config.clone(), script);
    assert_eq!(h.sim.next_arrival_time(), 3.0);

    // Unseeded config: the scripted stream continues where it left off.
    h.sim.setup(config).unwrap();
    assert_eq!(h.sim.next_arrival_time(), 4.0);
    assert_eq!(calls.borrow().len(), 2);
}
