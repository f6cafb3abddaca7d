use std::fmt::Write as _;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic time surface: an exponential-decay bump around a moving
/// event location, the shape real event-camera surfaces have.
fn generate_surface(rows: usize, cols: usize, cx: f64, cy: f64, tau: f64, rng: &mut SimpleRng) -> Vec<f64> {
    let mut values = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let d2 = (r as f64 - cx).powi(2) + (c as f64 - cy).powi(2);
            let v = (-d2 / (2.0 * tau * tau)).exp() + rng.gauss(0.0, 0.02);
            values.push(v.clamp(0.0, 1.0));
        }
    }
    values
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let rows = 9;
    let cols = 9;
    let n_surfaces = 60;

    let mut out = String::new();
    writeln!(out, "TSDATA {rows} {cols} TIMES").unwrap();

    // The activity center drifts across the sensor patch over time.
    let mut time = 0.0_f64;
    for i in 0..n_surfaces {
        time += 0.001 + 0.004 * rng.next_f64();
        let angle = i as f64 * 0.15;
        let cx = rows as f64 / 2.0 + 2.5 * angle.sin();
        let cy = cols as f64 / 2.0 + 2.5 * angle.cos();
        let tau = 1.2 + 0.5 * rng.next_f64();

        let values = generate_surface(rows, cols, cx, cy, tau, &mut rng);
        write!(out, "{time:.6}").unwrap();
        for v in values {
            write!(out, " {v:.6}").unwrap();
        }
        out.push('\n');
    }

    let output_path = "sample_data.tsd";
    std::fs::write(output_path, out).expect("Failed to write output file");

    println!("Wrote {n_surfaces} surfaces ({rows}x{cols}) to {output_path}");
}
