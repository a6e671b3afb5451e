//! Scene: the ordered element collection and the current selection.

use crate::element::{Element, ElementId, new_element_id};
use kurbo::{Point, Rect};

/// An ordered set of elements (back to front) plus at most one selected id.
///
/// Only the element list is persisted; selection is editor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: Vec<Element>,
    selected: Option<ElementId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from elements, keeping their order.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut scene = Self::new();
        for element in elements {
            scene.add(element);
        }
        scene
    }

    /// Append an element on top of the z-order and return its id.
    ///
    /// A clashing or empty id is replaced so ids stay unique.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        if element.id.is_empty() || self.contains(&element.id) {
            let fresh = new_element_id();
            log::warn!("Element id '{}' is not unique, reassigned to '{}'", element.id, fresh);
            element.id = fresh;
        }
        element.clamp_size();
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Remove an element. Clears the selection if it pointed at it.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.index_of(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(index))
    }

    /// Replace every element at once. Selection is cleared.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        self.selected = None;
        for element in elements {
            self.add(element);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Elements back to front.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Select an element. Returns false (and leaves selection alone) if the id is unknown.
    pub fn select(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn selected_element_mut(&mut self) -> Option<&mut Element> {
        let id = self.selected.clone()?;
        self.get_mut(&id)
    }

    /// Topmost element under a world point.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.hit_test(point, tolerance))
    }

    /// Union of every element's rotated bounding box.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::aabb)
            .reduce(|acc, r| acc.union(r))
    }

    /// Whether both scenes hold identical elements in identical order.
    pub fn same_elements(&self, other: &Scene) -> bool {
        self.elements == other.elements
    }

    /// Serialize the element list as a JSON array of element records.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.elements)
    }

    /// Parse a JSON array of element records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let elements: Vec<Element> = serde_json::from_str(json)?;
        Ok(Self::from_elements(elements))
    }
}
