use mastermind::{Outcome, Settings};
use mastermind_scenario_harness::{ScenarioHarness, flash_pattern};

#[test]
fn first_round_win_shows_success_screen() {
    let mut harness = ScenarioHarness::new(Settings::default());
    harness.enter_guess(&[2, 3, 1]);

    let outcome = harness.play(&[2, 3, 1]).unwrap();

    assert_eq!(outcome, Outcome::Won { rounds: 1 });
    assert_eq!(harness.pending_samples(), 0);
    assert_eq!(harness.line(0), "Success!");
    assert_eq!(harness.line(1), "Rounds: 1");
    assert_eq!(harness.lcd().cursor(), (false, false));
}

#[test]
fn entered_digits_are_echoed_before_scoring() {
    let mut harness = ScenarioHarness::new(Settings::default());
    harness.enter_guess(&[2, 3, 1]);

    harness.play(&[2, 3, 1]).unwrap();

    let screens = harness.lcd().screens();
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0], ["2 3 1".to_string(), String::new()]);
}

#[test]
fn leds_acknowledge_each_digit_then_celebrate() {
    let mut harness = ScenarioHarness::new(Settings::default());
    harness.enter_guess(&[2, 3, 1]);

    harness.play(&[2, 3, 1]).unwrap();

    // Per digit: one red, then one green per click. Two red end the input,
    // then red stays on while green flashes three times.
    assert_eq!(
        flash_pattern(&harness.take_flashes()),
        "RGG".to_owned() + "RGGG" + "RG" + "RR" + "R" + "GGG"
    );
    assert!(harness.elapsed_ms() >= 1000);
}

#[test]
fn second_round_win_counts_rounds() {
    let settings = Settings {
        length: 2,
        ..Settings::default()
    };
    let mut harness = ScenarioHarness::new(settings);
    harness.enter_guess(&[1, 1]);
    harness.acknowledge();
    harness.enter_guess(&[1, 2]);

    let outcome = harness.play(&[1, 2]).unwrap();

    assert_eq!(outcome, Outcome::Won { rounds: 2 });
    assert_eq!(harness.line(1), "Rounds: 2");
    assert_eq!(
        harness.lcd().screens()[1],
        ["Exact: 1".to_string(), "Approx: 0".to_string()]
    );
}
