use bitstruct::{ByteOrder, CompiledFormat, FieldDescriptor, FieldKind, Value, calculate_size};
use proptest::prelude::*;

fn field_strategy() -> impl Strategy<Value = FieldDescriptor> {
    let order = prop_oneof![Just(ByteOrder::Big), Just(ByteOrder::Little)];
    let kind_and_bits = prop_oneof![
        (1usize..=128).prop_map(|n| (FieldKind::Unsigned, n)),
        (1usize..=128).prop_map(|n| (FieldKind::Signed, n)),
        prop_oneof![Just(16usize), Just(32), Just(64)].prop_map(|n| (FieldKind::Float, n)),
        Just((FieldKind::Bool, 1usize)),
        (1usize..=80).prop_map(|n| (FieldKind::Raw, n)),
        (1usize..=20).prop_map(|n| (FieldKind::Pad, n)),
        (1usize..=6).prop_map(|n| (FieldKind::Text, n * 8)),
    ];

    (kind_and_bits, order)
        .prop_map(|((kind, bits), order)| FieldDescriptor::new_with_byte_order(kind, bits, order))
}

/// A value in range for `field`, or `None` for padding.
fn value_strategy(field: FieldDescriptor) -> BoxedStrategy<Option<Value>> {
    let n = field.bits as u32;
    match field.kind {
        FieldKind::Unsigned => any::<u128>()
            .prop_map(move |v| Some(Value::Unsigned(if n == 128 { v } else { v % (1u128 << n) })))
            .boxed(),
        FieldKind::Signed => any::<i128>()
            .prop_map(move |v| Some(Value::Signed((v << (128 - n)) >> (128 - n))))
            .boxed(),
        FieldKind::Float => match n {
            16 => (-2048i32..2048)
                .prop_map(|v| Some(Value::Float(v as f64)))
                .boxed(),
            32 => any::<f32>()
                .prop_filter("finite", |v| v.is_finite())
                .prop_map(|v| Some(Value::Float(v as f64)))
                .boxed(),
            _ => any::<f64>()
                .prop_filter("finite", |v| v.is_finite())
                .prop_map(|v| Some(Value::Float(v)))
                .boxed(),
        },
        FieldKind::Bool => any::<bool>().prop_map(|v| Some(Value::Bool(v))).boxed(),
        FieldKind::Raw => {
            let len = field.bits.div_ceil(8);
            let spare = len * 8 - field.bits;
            prop::collection::vec(any::<u8>(), len)
                .prop_map(move |mut v| {
                    if let Some(last) = v.last_mut() {
                        *last &= 0xffu8 << spare;
                    }
                    Some(Value::Raw(v))
                })
                .boxed()
        }
        FieldKind::Pad => Just(None).boxed(),
        FieldKind::Text => prop::collection::vec(0x20u8..0x7f, field.bits / 8)
            .prop_map(|v| String::from_utf8(v).ok().map(Value::Text))
            .boxed(),
    }
}

fn format_and_values() -> impl Strategy<Value = (CompiledFormat, Vec<Value>)> {
    prop::collection::vec(field_strategy(), 0..12).prop_flat_map(|fields| {
        let values: Vec<_> = fields.iter().map(|f| value_strategy(*f)).collect();
        let format = CompiledFormat::from_fields(fields).unwrap();
        (Just(format), values).prop_map(|(format, values)| {
            (format, values.into_iter().flatten().collect::<Vec<Value>>())
        })
    })
}

proptest! {
    #[test]
    fn prop_pack_unpack_round_trip((format, values) in format_and_values()) {
        let packed = format.pack(&values).unwrap();
        prop_assert_eq!(packed.len(), format.byte_len());
        prop_assert_eq!(format.unpack(&packed).unwrap(), values);
    }

    #[test]
    fn prop_round_trip_through_format_string((format, values) in format_and_values()) {
        let packed = bitstruct::pack(&format.to_string(), &values).unwrap();
        prop_assert_eq!(&packed, &format.pack(&values).unwrap());
    }

    #[test]
    fn prop_size_is_sum_of_widths(fields in prop::collection::vec(field_strategy(), 0..20)) {
        let expected: usize = fields.iter().map(|f| f.bits).sum();
        let format = CompiledFormat::from_fields(fields).unwrap();
        prop_assert_eq!(calculate_size(&format.to_string()).unwrap(), expected);
    }

    #[test]
    fn prop_unpack_from_offset((format, values) in format_and_values(), offset in 0usize..16) {
        let mut data = vec![0u8; (offset + format.total_bits()).div_ceil(8)];
        format.pack_into(&mut data, offset, &values, Default::default()).unwrap();
        prop_assert_eq!(format.unpack_from(&data, offset).unwrap(), values);
    }

    #[test]
    fn prop_byteswap_twice_is_identity(
        data in prop::collection::vec(any::<u8>(), 0..64),
        groups in prop::collection::vec(0usize..9, 0..8),
    ) {
        match bitstruct::byteswap_groups(&groups, &data) {
            Ok(swapped) => {
                prop_assert_eq!(bitstruct::byteswap_groups(&groups, &swapped).unwrap(), data);
            }
            Err(_) => {
                prop_assert!(groups.iter().sum::<usize>() > data.len());
            }
        }
    }
}
