use std::fmt::Write as _;

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;

/// One synthetic fastening run, shaped like a torque tester export.
struct RunSpec {
    file: &'static str,
    mean: f64,
    std_dev: f64,
    rows: usize,
}

const RUNS: &[RunSpec] = &[
    RunSpec {
        file: "run_a.tsv",
        mean: -0.32,
        std_dev: 0.18,
        rows: 60,
    },
    RunSpec {
        file: "run_b.tsv",
        mean: -0.45,
        std_dev: 0.22,
        rows: 90,
    },
    RunSpec {
        file: "run_c.tsv",
        mean: -0.15,
        std_dev: 0.12,
        rows: 120,
    },
    // Too few rows for the default sample size, to exercise the warning.
    RunSpec {
        file: "run_short.tsv",
        mean: -0.30,
        std_dev: 0.20,
        rows: 6,
    },
];

fn main() {
    let mut rng = Pcg64::seed_from_u64(42);

    for run in RUNS {
        let normal = Normal::new(run.mean, run.std_dev).expect("valid distribution");

        // Each line carries a trailing tab, so the export grows a fourth,
        // unnamed column the way the real tester output does.
        let mut out = String::new();
        out.push_str("Fastening No.\tDate/Time\tActual Torque [of nominal]\t\n");

        for row in 0..run.rows {
            let minute = row / 60;
            let second = row % 60;
            write!(out, "{}\t2024-03-12 08:{minute:02}:{second:02}\t", row + 1).unwrap();

            // Every 17th measurement is left blank.
            if row % 17 != 13 {
                let torque: f64 = normal.sample(&mut rng);
                write!(out, "{torque:.4}").unwrap();
            }
            out.push_str("\t\n");
        }

        std::fs::write(run.file, &out).expect("Failed to write output file");
        println!("Wrote {} rows to {}", run.rows, run.file);
    }
}
