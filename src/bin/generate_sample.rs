//! Writes a synthetic housing dataset to `assets/housing.csv` for the
//! housing dashboard. Deterministic: same seed, same file.

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 200;

    let output_path = "assets/housing.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "MedInc",
            "HouseAge",
            "AveRooms",
            "AveBedrms",
            "Population",
            "AveOccup",
            "Latitude",
            "Longitude",
            "MedHouseVal",
        ])
        .expect("Failed to write header");

    for _ in 0..n_rows {
        let med_inc = rng.gauss(3.8, 1.6).clamp(0.5, 15.0);
        let house_age = rng.range(1.0, 52.0).round();
        let ave_rooms = rng.gauss(5.4, 1.2).clamp(1.0, 12.0);
        let ave_bedrms = rng.gauss(1.1, 0.12).clamp(0.6, 2.5);
        let population = rng.gauss(1400.0, 700.0).clamp(20.0, 6000.0).round();
        let ave_occup = rng.gauss(3.0, 0.7).clamp(1.0, 8.0);
        let latitude = rng.range(32.5, 42.0);
        let longitude = rng.range(-124.3, -114.3);
        // House value tracks income with noise, capped like the source data.
        let med_house_val = (0.55 * med_inc + rng.gauss(0.6, 0.4)).clamp(0.15, 5.0);

        writer
            .write_record([
                format!("{med_inc:.4}"),
                format!("{house_age:.0}"),
                format!("{ave_rooms:.4}"),
                format!("{ave_bedrms:.4}"),
                format!("{population:.0}"),
                format!("{ave_occup:.4}"),
                format!("{latitude:.4}"),
                format!("{longitude:.4}"),
                format!("{med_house_val:.4}"),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} rows to {output_path}");
}
