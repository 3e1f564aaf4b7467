//! Print priming sugar doses across a range of beverage temperatures
//! Usage: cargo run --bin priming_table -- <volume_l> <vol_co2> [sugar_type]

use brewcode::calc::{self, PrimingConfig};
use brewcode::convert::StandardConverter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: priming_table <volume_l> <vol_co2> [sugar_type]");
        std::process::exit(2);
    }

    let volume: f64 = args[1].parse()?;
    let vol_co2: f64 = args[2].parse()?;
    let sugar = args.get(3).map(|s| s.as_str()).unwrap_or("dextrose");

    let profile = calc::priming::profile_or_default(sugar);
    println!("{:.1} L to {:.2} volumes CO2 with {}", volume, vol_co2, profile.name);
    println!("{:>6} {:>9} {:>9} {:>9} {:>8}", "temp C", "residual", "sugar g", "sugar ml", "delta sg");

    let converter = StandardConverter::new();
    for temp in 0..=25 {
        let temp = temp as f64;
        let config = PrimingConfig::new(volume)
            .with_temperature(temp, "c")
            .with_vol_co2(vol_co2)
            .with_sugar(sugar);
        let result = calc::compute_priming(&config, &converter)?;

        println!(
            "{:>6.0} {:>9.2} {:>9.1} {:>9.1} {:>8.4}",
            temp,
            calc::residual_co2(temp),
            result.mass_g,
            result.volume_ml,
            result.delta_sg
        );
    }

    Ok(())
}
