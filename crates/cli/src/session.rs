//! Interactive prediction session
//!
//! Prompts for origin, destination, quarter and carrier, then prints the
//! estimated fare. Runs until end of input or `quit`.

use std::io::{BufRead, Write};

use airfare_core::{FarePredictor, FareQuery};
use anyhow::Result;

use crate::display::{resolve_carrier, resolve_quarter};

/// Render a fare the way the session prints it
pub fn format_fare(fare: f64) -> String {
    format!("${:.2}", fare)
}

/// Translate display-level input into a raw query for the core
pub fn build_query(
    predictor: &FarePredictor,
    origin: &str,
    destination: &str,
    quarter: &str,
    carrier: &str,
) -> Result<FareQuery> {
    let quarter = resolve_quarter(quarter)?;
    let carrier = resolve_carrier(carrier, predictor.options().carriers);
    Ok(FareQuery::new(origin.trim(), destination.trim(), quarter, carrier))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Ok(None);
    }
    Ok(Some(line.to_string()))
}

/// Run the prompt loop over arbitrary input and output streams
pub fn run_session<R: BufRead, W: Write>(
    predictor: &FarePredictor,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Flight Price Predictor")?;
    writeln!(output, "Enter route information (\"quit\" to exit)")?;

    loop {
        let Some(origin) = prompt(&mut input, &mut output, "Origin City")? else {
            break;
        };
        let Some(destination) = prompt(&mut input, &mut output, "Destination City")? else {
            break;
        };
        let Some(quarter) = prompt(&mut input, &mut output, "Quarter")? else {
            break;
        };
        let Some(carrier) = prompt(&mut input, &mut output, "Carrier")? else {
            break;
        };

        let estimate = build_query(predictor, &origin, &destination, &quarter, &carrier)
            .and_then(|query| predictor.predict(&query).map_err(anyhow::Error::from));
        match estimate {
            Ok(fare) => writeln!(output, "Estimated Fare: {}", format_fare(fare))?,
            Err(err) => writeln!(output, "Error: {err}")?,
        }
        writeln!(output)?;
    }

    Ok(())
}
