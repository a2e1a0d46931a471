use anyhow::{bail, Result};
use clap::Parser;
use commute_core::{SpeedShares, TripRequest, TripResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Commute server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Home address
    #[arg(long)]
    home: String,

    /// Work address
    #[arg(long)]
    work: String,

    /// Current vehicle id (see GET /v1/vehicles)
    #[arg(long)]
    current: String,

    /// Candidate vehicle id
    #[arg(long)]
    new: String,

    /// Gas price per gallon
    #[arg(long, default_value_t = 3.5)]
    gas_price: f64,

    #[arg(long, default_value_t = 5.0)]
    days_per_week: f64,

    #[arg(long, default_value_t = 48.0)]
    weeks_per_year: f64,

    /// Fraction of the year treated as winter, 0..1
    #[arg(long, default_value_t = 0.0)]
    winter_frac: f64,

    /// Fuel-economy penalty during winter, 0..1
    #[arg(long, default_value_t = 0.0)]
    winter_pen: f64,

    /// Time shares at 65/70/75 mph, comma separated, summing to 1
    #[arg(long, default_value = "0.2,0.3,0.5")]
    speed_shares: String,

    /// Cost of swapping vehicles
    #[arg(long, default_value_t = 0.0)]
    upgrade_cost: f64,
}

fn parse_shares(raw: &str) -> Result<SpeedShares> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()?;
    if parts.len() != 3 {
        bail!("expected three comma-separated shares, got {}", parts.len());
    }
    Ok(SpeedShares {
        s65: parts[0],
        s70: parts[1],
        s75: parts[2],
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let speed_shares = parse_shares(&args.speed_shares)?;

    let request = TripRequest {
        home: args.home,
        work: args.work,
        gas_price: args.gas_price,
        days_per_week: args.days_per_week,
        weeks_per_year: args.weeks_per_year,
        winter_frac: args.winter_frac,
        winter_pen: args.winter_pen,
        speed_shares,
        current_vehicle_id: args.current,
        new_vehicle_id: args.new,
        upgrade_cost: args.upgrade_cost,
        vehicles: None,
    };

    println!("Computing trip comparison...");
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/v1/trips", args.url))
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        bail!(
            "server rejected request ({}): {}",
            status,
            body["error"].as_str().unwrap_or("unknown error")
        );
    }

    let result: TripResult = response.json().await?;

    println!("Round trip distance: {:.1} miles", result.distance_mi);
    println!(
        "Round trip cost:     ${:.2} current / ${:.2} candidate",
        result.rt_cost_cur, result.rt_cost_new
    );
    println!(
        "Yearly cost:         ${:.2} current / ${:.2} candidate",
        result.yearly_cur, result.yearly_new
    );
    println!("Yearly savings:      ${:.2}", result.savings);
    match result.payback_years {
        Some(years) => println!("Payback:             {:.1} years", years),
        None => println!("Payback:             never (no savings or no upgrade cost)"),
    }
    if let Some(roi) = result.roi {
        println!("ROI:                 {:.1}%/year", roi * 100.0);
    }

    Ok(())
}
