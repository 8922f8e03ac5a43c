//! Benchmark for the PID controllers and filters
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

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use discrete_ctrl::anti_windup::{AntiWindup, BackCalc, CondCalc, FilterAw, Unbounded};
use discrete_ctrl::element::CtrlElement;
use discrete_ctrl::filter::{MovingAverage, MovingMedian};
use discrete_ctrl::pid::{Pid, PidConfig, PidConfigBuilder};
use discrete_ctrl::saturation::Bounds;
use discrete_ctrl::time::{Millis, Sampled};

const DT: f64 = 0.01;

fn make_config() -> PidConfig<f64> {
    PidConfigBuilder::default()
        .kp(1.0)
        .ki(0.5)
        .kd(0.1)
        .build()
        .unwrap()
}

fn make_bounds() -> Bounds<f64> {
    Bounds::new(-10.0, 10.0).unwrap()
}

fn bench_strategy<A: AntiWindup<f64>>(c: &mut Criterion, name: &str, anti_windup: A) {
    let mut pid = Pid::new(make_config(), anti_windup);
    let setpoint = 1.0;
    let mut measurement = 0.9;

    c.bench_function(name, |b| {
        b.iter(|| {
            let output = pid.update(black_box(DT), black_box(setpoint - measurement));
            measurement += 0.0001; // prevent constant inputs
            black_box(output);
        });
    });
}

/// Every strategy only adds a saturation and a handful of flops to the plain PID law, so all of
/// them should land within a few nanoseconds of each other
fn bench_pid_strategies(c: &mut Criterion) {
    bench_strategy(c, "PID unbounded", Unbounded);
    bench_strategy(c, "PID back-calculation", BackCalc::new(make_bounds()));
    bench_strategy(c, "PID conditional integration", CondCalc::new(make_bounds()));
    bench_strategy(
        c,
        "PID filtered anti-windup",
        FilterAw::new(make_bounds(), 1.0).unwrap(),
    );
}

/// Dynamic dispatch costs one indirect call per update
fn bench_boxed_strategy(c: &mut Criterion) {
    let boxed: Box<dyn AntiWindup<f64>> = Box::new(BackCalc::new(make_bounds()));
    bench_strategy(c, "PID boxed back-calculation", boxed);
}

/// Timestamp-driven updates add a subtraction and a float conversion
fn bench_sampled_pid(c: &mut Criterion) {
    let mut pid = Sampled::new(Pid::new(make_config(), BackCalc::new(make_bounds())));
    let setpoint = 1.0;
    let mut measurement = 0.9;
    let mut now = Millis(0);

    c.bench_function("sampled PID", |b| {
        b.iter(|| {
            let output = pid.update(now, black_box(setpoint - measurement));
            measurement += 0.0001;
            now.0 += 10;
            black_box(output);
        });
    });
}

/// The median sorts its whole window on every update, the average only sums it
fn bench_moving_filters(c: &mut Criterion) {
    let mut average = MovingAverage::new(32, 0.0).unwrap();
    let mut median = MovingMedian::new(32, 0.0).unwrap();
    let mut u: f64 = 0.0;

    c.bench_function("moving average (32)", |b| {
        b.iter(|| {
            average.update(black_box(DT), black_box(u.sin()));
            u += 0.1;
            black_box(average.value());
        });
    });

    c.bench_function("moving median (32)", |b| {
        b.iter(|| {
            median.update(black_box(DT), black_box(u.sin()));
            u += 0.1;
            black_box(median.value());
        });
    });
}

criterion_group!(
    benches,
    bench_pid_strategies,
    bench_boxed_strategy,
    bench_sampled_pid,
    bench_moving_filters,
);
criterion_main!(benches);
