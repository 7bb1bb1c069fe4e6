use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

/// Numeric attribute `x` plus a binary nominal class.
pub fn header_numeric_binary() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NumericAttribute::new("x".into())) as AttributeRef,
        Arc::new(NominalAttribute::with_values(
            "class".into(),
            vec!["A".into(), "B".into()],
        )) as AttributeRef,
    ];
    Arc::new(InstanceHeader::new("bin".into(), attributes, 1))
}

/// Header whose class attribute is (invalidly) numeric.
pub fn header_numeric_class() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NumericAttribute::new("x".into())) as AttributeRef,
        Arc::new(NumericAttribute::new("target".into())) as AttributeRef,
    ];
    Arc::new(InstanceHeader::new("bad".into(), attributes, 1))
}

/// Outlook/windy/play schema used by the classifier tests.
pub fn header_weather() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NominalAttribute::with_values(
            "outlook".into(),
            vec!["sunny".into(), "overcast".into(), "rainy".into()],
        )) as AttributeRef,
        Arc::new(NominalAttribute::with_values(
            "windy".into(),
            vec!["false".into(), "true".into()],
        )) as AttributeRef,
        Arc::new(NominalAttribute::with_values(
            "play".into(),
            vec!["yes".into(), "no".into()],
        )) as AttributeRef,
    ];
    Arc::new(InstanceHeader::new("weather".into(), attributes, 2))
}
