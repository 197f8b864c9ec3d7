use std::process::ExitCode;

use clap::Parser;
use gateway_button::Coordinates;

#[derive(Parser, Debug)]
#[command(name = "gps-link")]
#[command(about = "Convert a +QGPSLOC reply into decimal coordinates and a map link")]
struct Args {
    /// Location reply, e.g. "+QGPSLOC: 061951.000,3150.7223N,11711.9293E,..."
    reply: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let coords: Coordinates = match args.reply.parse() {
        Ok(coords) => coords,
        Err(e) => {
            eprintln!("Error parsing GPS data: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        let out = serde_json::json!({
            "latitude": format!("{:.6}", coords.latitude),
            "longitude": format!("{:.6}", coords.longitude),
            "link": coords.maps_link(),
        });
        println!("{}", out);
    } else {
        println!("Latitude: {:.6}", coords.latitude);
        println!("Longitude: {:.6}", coords.longitude);
        println!("Google Maps Link: {}", coords.maps_link());
    }

    ExitCode::SUCCESS
}
