mod util;

use mesh_normalize::extract::DroppedCellPolicy;
use mesh_normalize::field::DataArray;
use mesh_normalize::mesh_error::MeshNormalizeError;
use mesh_normalize::normalize::{GridNormalizer, MeshPart, NormalizeConfig, ReloadParts};
use mesh_normalize::wire::{BufferHeader, BufferKind, decode_f32s, decode_u32s};
use util::*;

#[test]
fn config_from_json() {
    let config = NormalizeConfig::from_json(
        r#"{ "dropped_cells": "error", "compute_magnitude": true }"#,
    )
    .unwrap();
    assert_eq!(config.dropped_cells, DroppedCellPolicy::Error);
    assert!(config.compute_magnitude);

    assert_eq!(NormalizeConfig::from_json("{}").unwrap(), NormalizeConfig::default());
}

#[test]
fn bad_config_is_rejected() {
    for text in [
        r#"{ "dropped_cells": "loud" }"#,
        r#"{ "compute_magnitude": true, "colour": "red" }"#,
        "not json",
    ] {
        assert!(matches!(
            NormalizeConfig::from_json(text),
            Err(MeshNormalizeError::InvalidConfig(_))
        ));
    }
}

#[test]
fn reload_parts_default_to_fields() {
    let parts: ReloadParts = serde_json::from_str(r#"{ "vertices": true }"#).unwrap();
    let requested: Vec<MeshPart> = parts.requested().collect();
    assert_eq!(requested, vec![MeshPart::Vertices, MeshPart::Fields]);
}

#[test]
fn mesh_serializes_fields_by_name() {
    let grid = unit_tet()
        .try_with_point_array(scalars("Temperature", &[10.0, 20.0, 30.0, 40.0]))
        .unwrap();
    let mesh = GridNormalizer::default().normalize(&grid).unwrap();
    let json = serde_json::to_value(&mesh).unwrap();

    assert_eq!(
        json["fields"],
        serde_json::json!({
            "Temperature": {
                "X1": { "array": [10.0, 20.0, 30.0, 40.0], "min": 10.0, "max": 40.0 }
            }
        })
    );
    assert!(json.get("magnitudes").is_none());
    assert_eq!(json["bounds"]["zmax"], 1.0);
    assert_eq!(json["tetrahedra"], serde_json::json!([0, 1, 2, 3]));
}

#[test]
fn magnitudes_serialize_beside_the_component_map() {
    let velocity = DataArray::try_new("velocity", 2, vec![3.0, 4.0, 0.0, 1.0, 0.0, 0.0, 6.0, 8.0])
        .unwrap();
    let grid = unit_tet()
        .try_with_point_array(velocity)
        .unwrap()
        .try_with_point_array(scalars("T", &[1.0, 2.0, 3.0, 4.0]))
        .unwrap();
    let config = NormalizeConfig {
        compute_magnitude: true,
        ..NormalizeConfig::default()
    };
    let mesh = GridNormalizer::new(config).normalize(&grid).unwrap();
    let json = serde_json::to_value(&mesh).unwrap();

    let velocity = json["fields"]["velocity"].as_object().unwrap();
    let keys: Vec<&str> = velocity.keys().map(String::as_str).collect();
    assert_eq!(keys, ["X1", "X2"]);
    assert_eq!(json["fields"]["velocity"]["X2"]["array"], serde_json::json!([4.0, 1.0, 0.0, 8.0]));
    assert_eq!(json["magnitudes"]["velocity"], serde_json::json!({ "min": 0.0, "max": 10.0 }));
    assert_eq!(json["magnitudes"]["T"], serde_json::json!({ "min": 1.0, "max": 4.0 }));
}

#[test]
fn encoded_parts_decode_to_the_same_buffers() {
    let grid = quadratic_tet()
        .try_with_point_array(scalars("a", &[1.0; 10]))
        .unwrap()
        .try_with_point_array(
            mesh_normalize::field::DataArray::try_new("b", 2, vec![0.5; 20]).unwrap(),
        )
        .unwrap();
    let mesh = GridNormalizer::default().normalize(&grid).unwrap();

    let bytes = mesh.encode_part(MeshPart::Tetrahedra).unwrap();
    let (header, payload, rest) = BufferHeader::split_frame(&bytes).unwrap();
    assert_eq!(header.kind(), Some(BufferKind::Tetrahedra));
    assert_eq!(header.count(), 32);
    assert_eq!(decode_u32s(payload).unwrap(), mesh.tetrahedra);
    assert!(rest.is_empty());

    let bytes = mesh.encode_part(MeshPart::Vertices).unwrap();
    let (_, payload, _) = BufferHeader::split_frame(&bytes).unwrap();
    assert_eq!(decode_f32s(payload).unwrap(), mesh.vertices);

    let bytes = mesh.encode_part(MeshPart::Fields).unwrap();
    let mut rest = bytes.as_slice();
    let mut frames = Vec::new();
    while !rest.is_empty() {
        let (header, payload, tail) = BufferHeader::split_frame(rest).unwrap();
        assert_eq!(header.kind(), Some(BufferKind::FieldComponent));
        frames.push(decode_f32s(payload).unwrap());
        rest = tail;
    }
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], vec![1.0; 10]);
    assert_eq!(frames[2], vec![0.5; 10]);
}
