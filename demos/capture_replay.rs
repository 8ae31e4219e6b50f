use std::io::Cursor;

use nmea0183_capture::{
    CaptureBuilder, DEFAULT_BACKGROUND, Decoded, LineSource, SentenceData, interchange,
};

const SESSION: &str = "\
$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r
$GPWPL,5128.62,N,00027.58,W,EGLL*59\r
\r
$GPXTE,A,A,0.67,L,N*6F\r
$GPWPL,4916.45,N,12311.12,W,BOUNDARY*00\r
$GPRTE,2,1,c,0,PBRCPK,PBRTO,PTELGR,PPLAND,PYAMBU,PPFAIR,PWARRN,PMORTL,PLISMR*73\r
$GPDBT,12.3,f,3.7,M,2.0,F*30\r
";

fn print(decoded: &Decoded) {
    match decoded.sentence.data() {
        SentenceData::WPL(wpl) => println!(
            "waypoint {:?} at {:?}, {:?}",
            wpl.name, wpl.latitude, wpl.longitude
        ),
        SentenceData::RTE(rte) => {
            println!("route {:?}: {}", rte.route_id, rte.waypoints.join(" > "))
        }
        SentenceData::Unknown => println!(
            "unknown {}: {:?}",
            decoded.sentence.tag(),
            decoded.sentence.fields().data()
        ),
        data => println!("{data:?}"),
    }

    for diagnostic in &decoded.diagnostics {
        println!("  warning: {diagnostic}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut capture = CaptureBuilder::new(LineSource::new(Cursor::new(SESSION)))
        .background(DEFAULT_BACKGROUND.iter().copied())
        .build();

    let mut captured = Vec::new();
    for item in capture.by_ref() {
        match item {
            Ok(decoded) => {
                print(&decoded);
                captured.push(decoded);
            }
            Err(error) => println!("skipped: {error}"),
        }
    }
    println!("{:?}", capture.stats());

    let text =
        interchange::to_string_pretty_all(captured.iter().map(|decoded| &decoded.sentence))?;
    println!("{text}");

    let replayed = interchange::from_str_all(&text)?;
    assert_eq!(replayed, captured);
    println!("replayed {} sentences", replayed.len());

    Ok(())
}
