use crate::{SentenceData, decode_record, interchange};

fn waypoint_position(data: &SentenceData) -> (f64, f64) {
    let SentenceData::WPL(wpl) = data else {
        panic!("Expected WPL: {data:?}");
    };
    (wpl.latitude.unwrap(), wpl.longitude.unwrap())
}

#[test]
fn test_waypoint_round_trip() {
    let decoded = decode_record("$GPWPL,5128.62,N,00027.58,W,EGLL*59").unwrap();
    let (latitude, longitude) = waypoint_position(decoded.sentence.data());
    assert!((latitude - 51.477).abs() < 1e-9);
    assert!((longitude + 0.4597).abs() < 1e-4);

    let text = interchange::to_string_all([&decoded.sentence]).unwrap();
    let replayed = interchange::from_str_all(&text).unwrap();

    assert_eq!(replayed.len(), 1);
    assert_eq!(replayed[0].sentence.tag(), "GPWPL");
    assert_eq!(replayed[0].sentence.fields(), decoded.sentence.fields());
    assert_eq!(waypoint_position(replayed[0].sentence.data()), (latitude, longitude));
}

#[test]
fn test_replay_keeps_diagnostics() {
    let decoded = decode_record("$GPRMC,123519,A,4807.038,N,01131.000,E,fast,084.4,230394,003.1,W")
        .unwrap();
    assert_eq!(decoded.diagnostics.len(), 1);

    let text = interchange::to_string(&decoded.sentence).unwrap();
    let replayed = interchange::from_str(&text).unwrap();

    assert_eq!(replayed, decoded);
}

#[test]
fn test_every_attribute_survives() {
    let records = [
        "$GPRMC,162254.00,A,3723.02837,N,12159.39853,W,0.820,188.36,110706,,,A*74",
        "$GPGSV,2,2,08,15,37,055,42,18,10,112,,24,,,,29,62,210,48*4B",
        "$GPZDA,201530.00,04,07,2002,00,00*60",
        "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48",
    ];
    let decoded: Vec<_> = records
        .into_iter()
        .map(|record| decode_record(record).unwrap())
        .collect();

    let text = interchange::to_string_pretty_all(decoded.iter().map(|decoded| &decoded.sentence))
        .unwrap();
    let replayed = interchange::from_str_all(&text).unwrap();

    assert_eq!(replayed, decoded);
    for (before, after) in decoded.iter().zip(&replayed) {
        assert_eq!(before.sentence.attributes(), after.sentence.attributes());
    }
}
