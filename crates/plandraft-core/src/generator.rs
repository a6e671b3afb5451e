//! Boundary to an external layout generator.
//!
//! The generator is an outside service that turns a text request into a JSON
//! array of element records. This module builds the request, describes the
//! expected response, and validates what comes back. A payload is accepted
//! whole or rejected whole.

use crate::element::{Element, ElementKind, new_element_id};
use crate::error::{PlanError, PlanResult};
use crate::storage::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashSet;

/// Canvas area the generator is asked to fill.
pub const LAYOUT_AREA: (f64, f64) = (1000.0, 800.0);

/// One element record as produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

/// An external service that produces a layout payload for a request.
pub trait LayoutGenerator {
    /// Send `prompt` and resolve to the raw JSON response text.
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, PlanResult<String>>;
}

/// Full prompt sent to the generator for a user request.
pub fn layout_prompt(request: &str) -> String {
    let (w, h) = LAYOUT_AREA;
    format!(
        "You are an expert architectural assistant. Your task is to generate a floor plan \
         based on the user's request.\n\
         The available canvas space is approximately from x=0, y=0 to x={w}, y={h}. \
         Design the layout to fit well within this area.\n\
         Ensure all elements have valid properties and unique IDs.\n\
         Here is the user's request: \"{request}\""
    )
}

/// JSON schema the generator's response must follow.
pub fn response_schema() -> Value {
    let types: Vec<&str> = ElementKind::ALL.iter().map(|k| k.as_str()).collect();
    let type_help = format!("The type of the element. Must be one of: {}", types.join(", "));
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "id": { "type": "string", "description": "A unique identifier, e.g. 'el_12345'" },
                "type": {
                    "type": "string",
                    "enum": types,
                    "description": type_help,
                },
                "x": { "type": "number", "description": "The x-coordinate of the top-left corner." },
                "y": { "type": "number", "description": "The y-coordinate of the top-left corner." },
                "width": { "type": "number" },
                "height": { "type": "number" },
                "rotation": { "type": "number", "description": "Rotation in degrees, from 0 to 360." }
            },
            "required": ["id", "type", "x", "y", "width", "height", "rotation"]
        }
    })
}

/// Validate a generator payload into descriptors.
///
/// The payload must be a JSON array of objects, each with a string `id`, a
/// known `type`, and numeric `x`, `y`, `width`, `height` and `rotation`. Any
/// violation rejects the whole payload.
pub fn parse_layout(json: &str) -> PlanResult<Vec<ElementDescriptor>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(PlanError::NotASequence);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or(PlanError::InvalidDescriptor { index })?;
            parse_descriptor(index, object)
        })
        .collect()
}

fn parse_descriptor(index: usize, object: &Map<String, Value>) -> PlanResult<ElementDescriptor> {
    let string = |field: &'static str| {
        object
            .get(field)
            .and_then(Value::as_str)
            .ok_or(PlanError::MissingField { index, field })
    };
    let number = |field: &'static str| {
        object
            .get(field)
            .and_then(Value::as_f64)
            .ok_or(PlanError::MissingField { index, field })
    };

    let name = string("type")?;
    let kind = ElementKind::parse(name).ok_or_else(|| PlanError::UnknownElementType {
        index,
        name: name.to_string(),
    })?;
    Ok(ElementDescriptor {
        id: string("id")?.to_string(),
        kind,
        x: number("x")?,
        y: number("y")?,
        width: number("width")?,
        height: number("height")?,
        rotation: number("rotation")?,
    })
}

/// Turn validated descriptors into elements.
///
/// Sizes are clamped to the minimum. Empty or repeated ids are replaced.
pub fn into_elements(descriptors: Vec<ElementDescriptor>) -> Vec<Element> {
    let mut seen = HashSet::new();
    descriptors
        .into_iter()
        .map(|d| {
            let id = if d.id.is_empty() || seen.contains(&d.id) {
                new_element_id()
            } else {
                d.id
            };
            seen.insert(id.clone());
            let mut element = Element::new(d.kind, d.x, d.y, d.width, d.height).with_rotation(d.rotation);
            element.id = id;
            element
        })
        .collect()
}

/// Ask `generator` for a layout and validate the answer.
pub async fn generate_layout<G>(generator: &G, request: &str) -> PlanResult<Vec<Element>>
where
    G: LayoutGenerator + ?Sized,
{
    let prompt = layout_prompt(request);
    let payload = generator.generate(&prompt).await?;
    let descriptors = parse_layout(&payload)?;
    log::info!("Generator returned {} elements", descriptors.len());
    Ok(into_elements(descriptors))
}
