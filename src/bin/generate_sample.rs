/// One synthetic observable: legend text and its relaxation curve.
struct Variable {
    legend: &'static str,
    plateau: f64,
    tau: f64,
    noise: f64,
}

const VARIABLES: [Variable; 3] = [
    Variable { legend: "protein backbone", plateau: 2.1, tau: 60.0, noise: 0.08 },
    Variable { legend: "protein side chains", plateau: 3.4, tau: 90.0, noise: 0.12 },
    Variable { legend: "ligand", plateau: 1.2, tau: 25.0, noise: 0.15 },
];

const FRAMES: u32 = 500;

impl Variable {
    /// Relaxation towards a plateau: `plateau * (1 - exp(-frame / tau))`.
    fn at(&self, frame: f64) -> f64 {
        self.plateau * (1.0 - (-frame / self.tau).exp())
    }
}

/// Deterministic noise from a splitmix64 stream.
struct Noise {
    counter: u64,
    spare: Option<f64>,
}

impl Noise {
    fn seeded(seed: u64) -> Self {
        Noise {
            counter: seed,
            spare: None,
        }
    }

    fn next_bits(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.counter;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1).
    fn signed_unit(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 / (1u64 << 52) as f64 - 1.0
    }

    /// Standard normal sample (Marsaglia polar method).
    fn normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        loop {
            let (u, v) = (self.signed_unit(), self.signed_unit());
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let factor = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * factor);
                return u * factor;
            }
        }
    }
}

/// The complete .agr text: directives, then one `&`-terminated block per legend.
fn render_agr(noise: &mut Noise) -> String {
    let mut text = String::from(
        "@version 50122\n\
         @type xy\n\
         @title \"RMSD over the trajectory\"\n\
         @xaxis label \"frame\"\n\
         @yaxis label \"RMSD (A)\"\n",
    );
    for (i, var) in VARIABLES.iter().enumerate() {
        text.push_str(&format!("@s{i} legend \"{}\"\n", var.legend));
    }

    for var in &VARIABLES {
        for frame in 0..FRAMES {
            let frame = f64::from(frame);
            let value = var.at(frame) + var.noise * noise.normal();
            text.push_str(&format!("{frame} {value:.6}\n"));
        }
        text.push_str("&\n");
    }
    text
}

fn main() -> std::io::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample.agr".to_string());

    let text = render_agr(&mut Noise::seeded(42));
    std::fs::write(&output_path, text)?;

    println!(
        "Wrote {} series ({FRAMES} frames each) to {output_path}",
        VARIABLES.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_block_per_legend() {
        let text = render_agr(&mut Noise::seeded(7));
        let legends = text.lines().filter(|l| l.contains(" legend ")).count();
        let blocks = text.lines().filter(|l| *l == "&").count();
        assert_eq!(legends, VARIABLES.len());
        assert_eq!(blocks, VARIABLES.len());

        let points = text
            .lines()
            .filter(|l| !l.starts_with('@') && *l != "&")
            .count();
        assert_eq!(points, VARIABLES.len() * FRAMES as usize);
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(
            render_agr(&mut Noise::seeded(42)),
            render_agr(&mut Noise::seeded(42))
        );
    }
}
