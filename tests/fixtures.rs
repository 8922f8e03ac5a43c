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

#[cfg(test)]
#[allow(dead_code)]
pub mod test_pid {

    use discrete_ctrl::anti_windup::{AntiWindup, BackCalc, CondCalc, FilterAw};
    use discrete_ctrl::pid::{Pid, PidConfig, PidConfigBuilder};
    use discrete_ctrl::saturation::Bounds;

    pub const DT: f64 = 0.01;
    pub const KP: f64 = 5.0;
    pub const KI: f64 = 0.5;
    pub const KD: f64 = 0.1;
    pub const KAW: f64 = 1.0;
    pub const LIMIT: f64 = 0.5;

    pub fn make_config() -> PidConfig<f64> {
        PidConfigBuilder::default()
            .kp(KP)
            .ki(KI)
            .kd(KD)
            .build()
            .unwrap()
    }

    pub fn make_bounds() -> Bounds<f64> {
        Bounds::symmetric(LIMIT).unwrap()
    }

    pub fn make_controller<A: AntiWindup<f64>>(anti_windup: A) -> Pid<f64, A> {
        Pid::new(make_config(), anti_windup)
    }

    pub fn make_back_calc() -> Pid<f64, BackCalc<f64>> {
        make_controller(BackCalc::new(make_bounds()))
    }

    pub fn make_cond_calc() -> Pid<f64, CondCalc<f64>> {
        make_controller(CondCalc::new(make_bounds()))
    }

    pub fn make_filter_aw() -> Pid<f64, FilterAw<f64>> {
        make_controller(FilterAw::new(make_bounds(), KAW).unwrap())
    }

    /// One controller per anti-windup strategy, type-erased so tests can loop over them
    pub fn make_all_strategies() -> Vec<(&'static str, Pid<f64, Box<dyn AntiWindup<f64>>>)> {
        let bounds = make_bounds();
        vec![
            ("back", make_controller(Box::new(BackCalc::new(bounds)) as Box<dyn AntiWindup<f64>>)),
            ("cond", make_controller(Box::new(CondCalc::new(bounds)) as Box<dyn AntiWindup<f64>>)),
            (
                "filt",
                make_controller(
                    Box::new(FilterAw::new(bounds, KAW).unwrap()) as Box<dyn AntiWindup<f64>>
                ),
            ),
        ]
    }
}
