use pcc_types::{ElementDeclaration, Header, PropertyDeclaration, PropertyKind};
use pcc_wire::{ListCodec, ScalarCodec};

/// Dispatch entry resolved for one property.
#[derive(Clone, Copy, Debug)]
pub(crate) enum PropertyCodec {
    Scalar(&'static ScalarCodec),
    List(ListCodec),
}

/// What a decoded value feeds besides the output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    Plain,
    /// `x`, `y` or `z` of the vertex element, as axis 0, 1 or 2.
    Coordinate(usize),
    /// The index list of the face element.
    FaceIndices,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PropertyBinding {
    pub codec: PropertyCodec,
    pub role: Role,
}

/// One element with every property bound, in declaration order.
#[derive(Debug)]
pub(crate) struct ElementBinding {
    pub name: String,
    pub count: u64,
    pub properties: Vec<PropertyBinding>,
    pub kind: ElementKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ElementKind {
    Vertex,
    Face,
    Other,
}

pub(crate) const AXES: [&str; 3] = ["x", "y", "z"];

const FACE_LIST_NAMES: [&str; 2] = ["vertex_indices", "vertex_index"];

/// Resolve every declared property to its dispatch entry once, before
/// the data phase starts.
pub(crate) fn bind(header: &Header) -> Vec<ElementBinding> {
    header.elements.iter().map(bind_element).collect()
}

fn bind_element(element: &ElementDeclaration) -> ElementBinding {
    let kind = match element.name.as_str() {
        "vertex" => ElementKind::Vertex,
        "face" => ElementKind::Face,
        _ => ElementKind::Other,
    };
    let face_list = if kind == ElementKind::Face {
        face_list_position(element)
    } else {
        None
    };

    let properties = element
        .properties
        .iter()
        .enumerate()
        .map(|(position, property)| {
            let codec = match property.kind {
                PropertyKind::Scalar(kind) => PropertyCodec::Scalar(kind.codec()),
                PropertyKind::List(kind) => PropertyCodec::List(kind.codec()),
            };
            let role = match (kind, property.kind) {
                (ElementKind::Vertex, PropertyKind::Scalar(_)) => AXES
                    .iter()
                    .position(|axis| *axis == property.name)
                    .map_or(Role::Plain, Role::Coordinate),
                (ElementKind::Face, PropertyKind::List(_)) if face_list == Some(position) => {
                    Role::FaceIndices
                }
                _ => Role::Plain,
            };
            PropertyBinding { codec, role }
        })
        .collect();

    ElementBinding {
        name: element.name.clone(),
        count: element.count,
        properties,
        kind,
    }
}

/// The face list is the one named `vertex_indices` (or `vertex_index`),
/// otherwise the first list property.
fn face_list_position(element: &ElementDeclaration) -> Option<usize> {
    let is_list = |p: &PropertyDeclaration| matches!(p.kind, PropertyKind::List(_));
    element
        .properties
        .iter()
        .position(|p| is_list(p) && FACE_LIST_NAMES.contains(&p.name.as_str()))
        .or_else(|| element.properties.iter().position(is_list))
}

impl ElementBinding {
    /// Axes that have no bound property on this element.
    pub(crate) fn missing_axes(&self) -> impl Iterator<Item = &'static str> + '_ {
        AXES.iter().enumerate().filter_map(|(axis, name)| {
            let bound = self
                .properties
                .iter()
                .any(|p| p.role == Role::Coordinate(axis));
            (!bound).then_some(*name)
        })
    }

    pub(crate) fn has_face_list(&self) -> bool {
        self.properties.iter().any(|p| p.role == Role::FaceIndices)
    }
}
