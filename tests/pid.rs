// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod fixtures;
use fixtures::test_pid;

use approx::assert_relative_eq;
use discrete_ctrl::anti_windup::{AntiWindup, CondCalc, Unbounded};
use discrete_ctrl::element::CtrlElement;
use discrete_ctrl::error::ConfigError;
use discrete_ctrl::pid::{GainForm, Pid, PidConfig, PidConfigBuilder};

mod test_pid_config {

    use core::f64;

    use super::*;

    const NEW_GAIN: f64 = 10.0;
    // Gains only need to be finite; zero and negative gains are valid
    const INVALID_GAIN_VALUES: &[f64; 3] = &[f64::INFINITY, f64::NEG_INFINITY, f64::NAN];

    #[test]
    fn test_default_gains() {
        let config = PidConfig::<f64>::default();
        assert_eq!(config.gains(), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_get_and_set_gains() {
        let mut config = PidConfig::<f64>::default();

        assert!(config.set_kp(NEW_GAIN).is_ok());
        assert!(config.set_ki(NEW_GAIN).is_ok());
        assert!(config.set_kd(NEW_GAIN).is_ok());
        assert_eq!(config.gains(), (NEW_GAIN, NEW_GAIN, NEW_GAIN));

        for it in INVALID_GAIN_VALUES {
            assert_eq!(
                config.set_kp(*it),
                Err(ConfigError::InvalidProportionalGain)
            );
            assert_eq!(config.set_ki(*it), Err(ConfigError::InvalidIntegralGain));
            assert_eq!(config.set_kd(*it), Err(ConfigError::InvalidDerivativeGain));

            // Failing to set a gain should not change the value
            assert_eq!(config.gains(), (NEW_GAIN, NEW_GAIN, NEW_GAIN));
        }

        assert!(config.set_kp(-1.0).is_ok());
        assert!(config.set_ki(0.0).is_ok());
        assert_eq!(config.kp(), -1.0);
        assert_eq!(config.ki(), 0.0);
    }

    #[test]
    fn test_build_gains() {
        let config = PidConfigBuilder::default()
            .kp(2.0)
            .ki(0.5)
            .kd(0.25)
            .build()
            .unwrap();
        assert_eq!(config.gains(), (2.0, 0.5, 0.25));

        for it in INVALID_GAIN_VALUES {
            let result = PidConfigBuilder::default().kp(*it).build();
            assert_eq!(result, Err(ConfigError::InvalidProportionalGain));

            let result = PidConfigBuilder::default().ki(*it).build();
            assert_eq!(result, Err(ConfigError::InvalidIntegralGain));

            let result = PidConfigBuilder::default().kd(*it).build();
            assert_eq!(result, Err(ConfigError::InvalidDerivativeGain));
        }
    }

    #[test]
    fn test_series_form() {
        let mut config = PidConfig::default();
        assert!(config.set_series(2.0, 4.0, 0.5).is_ok());
        assert_eq!(config.gains(), (2.25, 0.5, 1.0));

        let built = PidConfigBuilder::default()
            .kp(NEW_GAIN)
            .series(2.0, 4.0, 0.5)
            .build()
            .unwrap();
        assert_eq!(built, config);
    }

    #[test]
    fn test_standard_form() {
        let mut config = PidConfig::default();
        assert!(config.set_standard(2.0, 4.0, 0.5).is_ok());
        assert_eq!(config.gains(), (2.0, 0.5, 1.0));

        let built = PidConfigBuilder::default()
            .standard(2.0, 4.0, 0.5)
            .kd(NEW_GAIN)
            .build()
            .unwrap();
        assert_eq!(built, config);
    }

    #[test]
    fn test_invalid_gain_forms() {
        let mut config = PidConfig::default();
        config.set_parallel(1.0, 2.0, 3.0).unwrap();

        for ti in [0.0, f64::INFINITY, f64::NAN] {
            assert_eq!(
                config.set_standard(1.0, ti, 0.0),
                Err(ConfigError::InvalidIntegralTime)
            );
            assert_eq!(
                config.set_series(1.0, ti, 0.0),
                Err(ConfigError::InvalidIntegralTime)
            );
        }
        assert_eq!(
            config.set_gains(GainForm::Series {
                k: 1.0,
                tau_i: 1.0,
                tau_d: f64::NAN
            }),
            Err(ConfigError::InvalidDerivativeTime)
        );

        // Rejected forms leave every gain untouched
        assert_eq!(config.gains(), (1.0, 2.0, 3.0));

        let result = PidConfigBuilder::<f64>::default()
            .standard(1.0, 0.0, 0.0)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidIntegralTime));
    }

    #[test]
    fn test_gain_form_to_parallel() {
        let form = GainForm::Parallel {
            kp: 1.0,
            ki: 2.0,
            kd: 3.0,
        };
        assert_eq!(form.to_parallel(), Ok((1.0, 2.0, 3.0)));

        let form = GainForm::Standard {
            kp: 3.0,
            ti: 2.0,
            td: 0.0,
        };
        assert_eq!(form.to_parallel(), Ok((3.0, 1.5, 0.0)));
    }

    #[test]
    fn test_config_error_messages() {
        let message = ConfigError::InvalidIntegralTime.to_string();
        assert!(message.contains("Integral time"));
    }
}

mod test_pid_computation {
    use super::*;

    fn make_unbounded(kp: f64, ki: f64, kd: f64) -> Pid<f64, Unbounded> {
        let config = PidConfigBuilder::default()
            .kp(kp)
            .ki(ki)
            .kd(kd)
            .build()
            .unwrap();
        Pid::unbounded(config)
    }

    #[test]
    fn test_pure_proportional_control() {
        let mut pid = make_unbounded(2.0, 0.0, 0.0);
        assert_eq!(pid.update(0.1, 1.5), 3.0);
        assert_eq!(pid.value(), 3.0);
        assert_eq!(pid.error(), 1.5);

        assert_eq!(pid.update(0.1, -0.5), -1.0);
    }

    #[test]
    fn test_integral_accumulation() {
        let mut pid = make_unbounded(0.0, 1.0, 0.0);
        for i in 1..=3 {
            pid.update(0.5, 2.0);
            assert_eq!(pid.error_i(), i as f64);
            assert_eq!(pid.value(), i as f64);
        }
    }

    #[test]
    fn test_derivative_of_error() {
        let mut pid = make_unbounded(0.0, 0.0, 1.0);

        pid.update(0.1, 1.0);
        assert_relative_eq!(pid.error_d(), 10.0);
        assert_relative_eq!(pid.value(), 10.0);

        // Constant error has no derivative
        pid.update(0.1, 1.0);
        assert_eq!(pid.error_d(), 0.0);
        assert_eq!(pid.value(), 0.0);

        pid.update(0.1, 0.5);
        assert_relative_eq!(pid.error_d(), -5.0);
    }

    #[test]
    fn test_unbounded_output_is_the_plain_sum() {
        let mut pid = make_unbounded(test_pid::KP, test_pid::KI, test_pid::KD);
        let output = pid.update(test_pid::DT, 1.0);

        let expected = test_pid::KP * 1.0
            + test_pid::KI * (1.0 * test_pid::DT)
            + test_pid::KD * (1.0 / test_pid::DT);
        assert_relative_eq!(output, expected);
        assert!(output > test_pid::LIMIT);
    }

    #[test]
    fn test_set_error_seeds_derivative() {
        let mut pid = make_unbounded(0.0, 0.0, 1.0);
        pid.set_error(1.0);
        pid.update(0.5, 1.0);
        assert_eq!(pid.error_d(), 0.0);
    }

    #[test]
    fn test_single_precision() {
        let config = PidConfigBuilder::<f32>::default().kp(2.0).build().unwrap();
        let mut pid = Pid::unbounded(config);
        assert_eq!(pid.update(0.1f32, 0.25f32), 0.5f32);
    }
}

mod test_pid_time_step {
    use super::test_pid::*;
    use super::*;

    const INVALID_DT_VALUES: &[f64; 4] = &[0.0, -0.0, -DT, f64::NAN];

    fn warm_up<A: AntiWindup<f64>>(pid: &mut Pid<f64, A>) {
        for i in 0..20 {
            pid.update(DT, 0.1 * (i as f64).sin());
        }
        pid.update(DT, 1.0);
    }

    fn assert_invalid_steps_are_noops<A: AntiWindup<f64> + Clone>(mut pid: Pid<f64, A>) {
        warm_up(&mut pid);
        let mut twin = pid.clone();
        let snapshot = (pid.value(), pid.error(), pid.error_i(), pid.error_d());

        for dt in INVALID_DT_VALUES {
            assert_eq!(pid.update(*dt, 3.0), snapshot.0);
            assert_eq!(
                (pid.value(), pid.error(), pid.error_i(), pid.error_d()),
                snapshot
            );
        }

        // Hidden strategy state must be untouched as well
        assert_eq!(pid.update(DT, 0.2), twin.update(DT, 0.2));
        assert_eq!(pid.error_i(), twin.error_i());
    }

    #[test]
    fn test_non_positive_dt_is_noop_for_every_strategy() {
        assert_invalid_steps_are_noops(make_controller(Unbounded));
        assert_invalid_steps_are_noops(make_back_calc());
        assert_invalid_steps_are_noops(make_cond_calc());
        assert_invalid_steps_are_noops(make_filter_aw());
    }

    #[test]
    fn test_first_update_with_zero_dt_is_noop() {
        let mut pid = make_back_calc();
        assert_eq!(pid.update(0.0, 1.0), 0.0);
        assert_eq!(pid.error(), 0.0);
        assert_eq!(pid.error_i(), 0.0);
    }
}

mod test_pid_state_overrides {
    use super::test_pid::*;
    use super::*;

    #[test]
    fn test_reset() {
        let mut pid = make_cond_calc();
        pid.update(DT, 0.01);
        pid.update(DT, 1.0);
        assert_ne!(pid.value(), 0.0);
        assert_ne!(pid.anti_windup().error_i_prev(), 0.0);

        pid.reset();
        assert_eq!(pid.value(), 0.0);
        assert_eq!(pid.error(), 0.0);
        assert_eq!(pid.error_i(), 0.0);
        assert_eq!(pid.error_d(), 0.0);
        assert_eq!(pid.anti_windup().error_i_prev(), 0.0);
    }

    /// Handing over from manual control at a given output must not bump the output
    #[test]
    fn test_set_value_is_bumpless() {
        for (name, mut pid) in make_all_strategies() {
            pid.update(DT, 0.3);
            pid.set_value(0.3);
            assert_eq!(pid.value(), 0.3, "{name}");
            assert_eq!(pid.error_i(), 0.3 / KI, "{name}");
            assert_eq!(pid.error(), 0.0, "{name}");
            assert_eq!(pid.error_d(), 0.0, "{name}");

            // With zero error, the integral term alone carries the output over
            assert_eq!(pid.update(DT, 0.0), 0.3, "{name}");
        }
    }

    #[test]
    fn test_set_value_without_integral_gain() {
        let config = PidConfigBuilder::default().kp(2.0).build().unwrap();
        let mut pid = Pid::unbounded(config);
        pid.update(DT, 1.0);
        pid.set_value(0.7);
        assert_eq!(pid.value(), 0.7);
        assert_eq!(pid.error_i(), 0.0);
    }

    #[test]
    fn test_set_value_syncs_conditional_integration() {
        let mut pid = make_cond_calc();
        pid.set_value(0.2);
        assert_eq!(pid.anti_windup().error_i_prev(), pid.error_i());

        // A saturating error now freezes the accumulator at the overridden value
        pid.update(DT, 1.0);
        assert_eq!(pid.error_i(), 0.2 / KI);
    }

    #[test]
    fn test_set_value_and_error() {
        let mut pid = make_controller(Unbounded);
        pid.set_value_and_error(0.4, 0.1, DT);

        assert_eq!(pid.value(), 0.4);
        assert_eq!(pid.error(), 0.1);
        assert_relative_eq!(pid.error_d(), 10.0);
        assert_relative_eq!(pid.error_i(), -2.2, epsilon = 1e-12);

        let reproduced = KP * pid.error() + KI * pid.error_i() + KD * pid.error_d();
        assert_relative_eq!(reproduced, 0.4, epsilon = 1e-12);

        // A non-positive step leaves the derivative out
        pid.reset();
        pid.set_value_and_error(0.4, 0.1, 0.0);
        assert_eq!(pid.error_d(), 0.0);
        assert_relative_eq!(pid.error_i(), -0.2, epsilon = 1e-12);
    }
}

mod test_pid_dispatch {
    use super::test_pid::*;
    use super::*;
    use discrete_ctrl::anti_windup::BackCalc;

    #[test]
    fn test_boxed_strategy_matches_static_strategy() {
        let mut fixed = make_back_calc();
        let boxed: Box<dyn AntiWindup<f64>> = Box::new(BackCalc::new(make_bounds()));
        let mut dynamic = make_controller(boxed);

        for i in 0..200 {
            let error = if i < 100 { 1.0 } else { -0.02 * i as f64 };
            assert_eq!(fixed.update(DT, error), dynamic.update(DT, error));
            assert_eq!(fixed.error_i(), dynamic.error_i());
        }
    }

    #[test]
    fn test_strategy_can_be_swapped_at_runtime() {
        let boxed: Box<dyn AntiWindup<f64>> = Box::new(Unbounded);
        let mut pid = make_controller(boxed);
        assert!(pid.update(DT, 1.0) > LIMIT);

        *pid.anti_windup_mut() = Box::new(CondCalc::new(make_bounds()));
        assert_eq!(pid.update(DT, 1.0), LIMIT);
    }

    #[test]
    fn test_pid_as_control_element() {
        let mut direct = make_filter_aw();
        let mut elements: Vec<Box<dyn CtrlElement<f64>>> = vec![Box::new(make_filter_aw())];

        for _ in 0..10 {
            direct.update(DT, 0.05);
            elements[0].update(DT, 0.05);
        }
        assert_eq!(elements[0].value(), direct.value());
    }
}
