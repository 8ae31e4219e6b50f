use crate::{
    ChecksumError, ChecksumMode, FramingError, RawRecord, ValidationError, ValidatorBuilder,
    checksum,
    framing::checksum_field, validate,
};

#[test]
fn test_checksum_field_ok() {
    assert_eq!(checksum_field("1F"), Ok(0x1F));
    assert_eq!(checksum_field("a0"), Ok(0xA0));
    assert_eq!(checksum_field("00"), Ok(0x00));
}

#[test]
fn test_checksum_field_malformed() {
    for text in ["1", "1F43", "1Fzz", "zz", "+1", " 1"] {
        assert_eq!(
            checksum_field(text),
            Err(ChecksumError::Malformed {
                text: text.to_owned()
            }),
            "Failed: {text:?}"
        );
    }
}

#[test]
fn test_checksum_values() {
    assert_eq!(checksum(b""), 0);
    assert_eq!(checksum(b"GPXTE,A,A,0.67,L,N"), 0x6F);
    assert_eq!(
        checksum(b"GPGSA,A,2,29,19,28,,,,,,,,,,23.4,12.1,20.0"),
        0x0F
    );
}

#[test]
fn test_validate_valid_checksum() {
    let fields = validate("$GPGLL,2542.9243,N,08013.6310,W,162823.000,A*29").unwrap();
    let expected = [
        "GPGLL",
        "2542.9243",
        "N",
        "08013.6310",
        "W",
        "162823.000",
        "A",
    ];
    assert_eq!(fields.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_validate_invalid_checksum() {
    let result = validate("$GPGLL,2542.9243,N,08013.6310,W,162823.000,A*00");
    assert_eq!(
        result,
        Err(ValidationError::Checksum(ChecksumError::Mismatch {
            computed: 0x29,
            found: 0x00,
        }))
    );
}

#[test]
fn test_validate_keeps_empty_fields() {
    let fields = validate("$GPGSA,A,2,29,19,28,,,,,,,,,,23.4,12.1,20.0*0F").unwrap();
    assert_eq!(fields.len(), 18);
    assert_eq!(fields.get(6), "");
    assert_eq!(fields.get(15), "23.4");
    assert_eq!(fields.get(17), "20.0");
}

#[test]
fn test_validate_without_checksum() {
    let fields = validate("$GPWPL,5128.62,N,00027.58,W,EGLL").unwrap();
    assert_eq!(fields.tag(), "GPWPL");
    assert_eq!(fields.len(), 6);

    // An empty suffix reads as no checksum at all.
    let fields = validate("$GPWPL,5128.62,N,00027.58,W,EGLL*").unwrap();
    assert_eq!(fields.get(5), "EGLL");
}

#[test]
fn test_validate_required_checksum() {
    let validator = ValidatorBuilder::new()
        .checksum_mode(ChecksumMode::Required)
        .build();

    assert!(validator.validate("$GPWPL,5128.62,N,00027.58,W,EGLL*59").is_ok());
    assert_eq!(
        validator.validate("$GPWPL,5128.62,N,00027.58,W,EGLL"),
        Err(ValidationError::Checksum(ChecksumError::Missing))
    );
}

#[test]
fn test_validate_splits_at_last_asterisk() {
    let body = "GPTXT,a*b";
    let record = format!("${body}*{:02X}", checksum(body.as_bytes()));
    let fields = validate(record).unwrap();
    assert_eq!(fields.get(1), "a*b");
}

#[test]
fn test_validate_framing() {
    assert_eq!(
        validate("42.9243,N,08013.6310,W,162823.000,A*29"),
        Err(ValidationError::Framing(FramingError::MissingSentinel {
            found: '4'
        }))
    );
    assert_eq!(
        validate(""),
        Err(ValidationError::Framing(FramingError::Empty))
    );
    assert_eq!(
        validate("\r\n"),
        Err(ValidationError::Framing(FramingError::Empty))
    );
    assert_eq!(
        validate("$"),
        Err(ValidationError::Framing(FramingError::MissingTag))
    );
    assert_eq!(
        validate("$,1,2"),
        Err(ValidationError::Framing(FramingError::MissingTag))
    );
    assert_eq!(
        validate("$GPWPL,51°28,N"),
        Err(ValidationError::Framing(FramingError::NonAscii))
    );
}

#[test]
fn test_validate_encapsulation_sentinel() {
    let body = "AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0";
    let record = format!("!{body}*{:02X}", checksum(body.as_bytes()));
    let record = RawRecord::from(record);
    let validator = ValidatorBuilder::new().build();
    let validated = validator.validate_body(&record).unwrap();

    assert_eq!(validated.sentinel, '!');
    assert_eq!(validated.content, body);
    assert_eq!(validated.checksum, Some(checksum(body.as_bytes())));
}

#[test]
fn test_wire_form_round_trip() {
    let record = "$GPRTE,2,1,c,0,PBRCPK,PBRTO,PTELGR,PPLAND,PYAMBU,PPFAIR,PWARRN,PMORTL,PLISMR*73";
    let fields = validate(record).unwrap();
    assert_eq!(fields.to_string(), record);
    assert_eq!(fields.checksum(), 0x73);
}
