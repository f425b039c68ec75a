use rfsense_core::{
    DecodeContext, DeviceRegistry, FieldValue, Pulse, PulseDemodulator, Record, dispatch,
};

const PULSE_US: u32 = 500;

/// Pulse train sending `frame` `repeats` times with the given gap for a zero
/// bit, a one bit, a row break and the end of the transmission.
fn train(frame: &[u8], bits: usize, repeats: usize, gaps: [u32; 4]) -> Vec<Pulse> {
    let [zero, one, row, end] = gaps;
    let mut pulses = vec![Pulse::new(PULSE_US, row)];
    for repeat in 0..repeats {
        if repeat > 0 {
            pulses.push(Pulse::new(PULSE_US, row));
        }
        for bit in 0..bits {
            let set = frame[bit / 8] >> (7 - bit % 8) & 1 == 1;
            pulses.push(Pulse::new(PULSE_US, if set { one } else { zero }));
        }
    }
    pulses.push(Pulse::new(PULSE_US, end));
    pulses
}

fn test_sensor_train(frame: &[u8]) -> Vec<Pulse> {
    train(frame, 40, 3, [1000, 3000, 6000, 10000])
}

fn run(registry: &DeviceRegistry, pulses: &[Pulse]) -> (usize, Vec<Record>) {
    let mut records = Vec::new();
    let ctx = DecodeContext::new(Some(1_700_000_000.0));
    let total = dispatch(registry, &PulseDemodulator, pulses, &ctx, &mut records).unwrap();
    (total, records)
}

#[test]
fn reference_transmission_decodes_once() {
    let pulses = test_sensor_train(&[0x4B, 0xF4, 0x7A, 0xBE, 0x32]);
    let (total, records) = run(&DeviceRegistry::builtin(), &pulses);

    assert_eq!(total, 1);
    let record = &records[0];
    assert_eq!(
        record.get("model"),
        Some(&FieldValue::String("Test Sensor".to_string()))
    );
    assert_eq!(record.get("id"), Some(&FieldValue::Int(75)));
    assert_eq!(record.get("channel"), Some(&FieldValue::Int(3)));
    assert_eq!(record.get("humidity"), Some(&FieldValue::Int(143)));
    assert_eq!(
        record.get("time"),
        Some(&FieldValue::String("2023-11-14T22:13:20Z".to_string()))
    );
}

#[test]
fn noise_decodes_nothing() {
    let pulses = vec![Pulse::new(PULSE_US, 1000); 16];
    let (total, records) = run(&DeviceRegistry::builtin(), &pulses);
    assert_eq!(total, 0);
    assert!(records.is_empty());
}

#[test]
fn disabled_device_contributes_nothing() {
    let pulses = test_sensor_train(&[0x4B, 0xF4, 0x7A, 0xBE, 0x32]);
    let mut registry = DeviceRegistry::builtin();
    registry.set_enabled("test sensor", false).unwrap();

    let (total, _) = run(&registry, &pulses);
    assert_eq!(total, 0);
}

#[test]
fn rubicson_lookalike_is_left_to_rubicson() {
    // Valid Rubicson CRC in a Test Sensor sized row.
    let pulses = test_sensor_train(&[0x11, 0x22, 0x33, 0x47, 0x60]);
    let (total, _) = run(&DeviceRegistry::builtin(), &pulses);
    assert_eq!(total, 0);
}

#[test]
fn rubicson_transmission_decodes_with_rubicson() {
    // 0x5C, battery OK, channel 2, 21.5 C, CRC nibbles 0xD and 0x1.
    let pulses = train(&[0x5C, 0x90, 0xD7, 0xFD, 0x10], 36, 2, [1000, 2000, 4000, 10000]);
    let (total, records) = run(&DeviceRegistry::builtin(), &pulses);

    assert_eq!(total, 1);
    assert_eq!(
        records[0].get("model"),
        Some(&FieldValue::String("Rubicson Temperature Sensor".to_string()))
    );
    assert_eq!(records[0].get("temperature_C"), Some(&FieldValue::Float(21.5)));
}
