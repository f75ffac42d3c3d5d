use crate::models::INSTRUMENTS;

pub fn run() {
    println!("Supported instruments:");
    for instrument in INSTRUMENTS {
        let p = &instrument.profile;
        println!(
            "  {:<6} {:<40} start {:>7.2}  volatility {:.3}  trend {:.4}  base volume {}",
            instrument.ticker, instrument.name, p.start_price, p.volatility, p.trend, p.base_volume,
        );
    }
}
