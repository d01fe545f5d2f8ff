//! The render contract between disclosure widgets and a rendering backend.
//!
//! Disclosure widgets do not draw anything themselves. Each one builds a
//! [`RenderRequest`] describing the element it wants (caller attributes merged
//! with the attributes the widget owns, its slot value, and its visibility)
//! and hands it to a [`Renderer`].
//!
//! [`ElementRenderer`] is a backend-neutral implementation that produces an
//! [`Element`] description. It honors the render features a request enables:
//!
//! - **Render strategy**: an invisible element is either removed entirely
//!   ([`RenderStrategy::Unmount`]) or kept but hidden
//!   ([`RenderStrategy::Hidden`])
//! - **Static**: an element marked static is always rendered as if visible

use std::collections::BTreeMap;
use std::ops::BitOr;

use horizon_disclosure_core::DisclosureSlot;
use serde::{Deserialize, Serialize};

/// Tag used when a widget should render its children without a wrapper.
pub const FRAGMENT: &str = "#fragment";

/// A set of element attributes.
///
/// Attribute values are strings; boolean attributes such as `hidden` use an
/// empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute using builder pattern.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Apply an attribute owned by the widget.
    ///
    /// `Some` overrides whatever the caller supplied; `None` removes the
    /// caller's value so the attribute is absent from the output.
    pub fn set_owned(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.0.insert(name.to_string(), value);
            }
            None => {
                self.0.remove(name);
            }
        }
    }

    /// Get an attribute's value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check whether an attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// What happens to an element that is not visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderStrategy {
    /// Remove the element from the output.
    #[default]
    Unmount,
    /// Keep the element but mark it hidden.
    Hidden,
}

impl RenderStrategy {
    /// The strategy for an `unmount` flag.
    pub fn from_unmount(unmount: bool) -> Self {
        if unmount { Self::Unmount } else { Self::Hidden }
    }
}

/// Optional render behaviors a widget opts into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenderFeatures {
    /// Honor [`RenderRequest::strategy`] for invisible elements.
    pub render_strategy: bool,
    /// Honor [`RenderRequest::is_static`].
    pub is_static: bool,
}

impl RenderFeatures {
    /// No optional behavior: the element is always rendered.
    pub const NONE: Self = Self {
        render_strategy: false,
        is_static: false,
    };

    /// Invisible elements are unmounted or hidden.
    pub const RENDER_STRATEGY: Self = Self {
        render_strategy: true,
        is_static: false,
    };

    /// Static elements ignore visibility.
    pub const STATIC: Self = Self {
        render_strategy: false,
        is_static: true,
    };
}

impl BitOr for RenderFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            render_strategy: self.render_strategy || rhs.render_strategy,
            is_static: self.is_static || rhs.is_static,
        }
    }
}

/// Everything a renderer needs to produce one element.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    /// Attributes to put on the element, widget-owned values already applied.
    pub props: Attributes,
    /// The widget's slot value, for conditional content.
    pub slot: DisclosureSlot,
    /// Caller-selected tag, if any.
    pub tag: Option<&'a str>,
    /// Tag used when the caller did not select one.
    pub default_tag: &'static str,
    /// Widget name, for diagnostics.
    pub name: &'static str,
    /// Whether the element should currently be shown.
    pub visible: bool,
    /// Which optional behaviors apply.
    pub features: RenderFeatures,
    /// What to do with an invisible element.
    pub strategy: RenderStrategy,
    /// Render regardless of visibility.
    pub is_static: bool,
}

impl RenderRequest<'_> {
    /// The tag to render.
    pub fn resolved_tag(&self) -> &str {
        self.tag.unwrap_or(self.default_tag)
    }
}

/// A rendered element description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// The element tag.
    pub tag: String,
    /// The widget that produced it.
    pub name: &'static str,
    /// Final attributes.
    pub attributes: Attributes,
    /// The slot value it was rendered with.
    pub slot: DisclosureSlot,
}

/// The result of rendering a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    /// The element is present and visible.
    Rendered(Element),
    /// The element is present but hidden.
    Hidden(Element),
    /// Nothing was rendered.
    Nothing,
}

impl RenderOutput {
    /// Check whether an element is present in the output.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Nothing)
    }

    /// The element, if present.
    pub fn element(&self) -> Option<&Element> {
        match self {
            Self::Rendered(element) | Self::Hidden(element) => Some(element),
            Self::Nothing => None,
        }
    }
}

/// A rendering backend.
pub trait Renderer {
    /// Produce output for `request`.
    fn render(&mut self, request: RenderRequest<'_>) -> RenderOutput;
}

/// Renders requests into [`Element`] descriptions.
#[derive(Debug, Default)]
pub struct ElementRenderer;

impl ElementRenderer {
    /// Create a new element renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for ElementRenderer {
    fn render(&mut self, request: RenderRequest<'_>) -> RenderOutput {
        let mut element = Element {
            tag: request.resolved_tag().to_string(),
            name: request.name,
            attributes: request.props.clone(),
            slot: request.slot,
        };

        if request.visible || !request.features.render_strategy {
            return RenderOutput::Rendered(element);
        }
        if request.features.is_static && request.is_static {
            return RenderOutput::Rendered(element);
        }

        match request.strategy {
            RenderStrategy::Unmount => {
                tracing::trace!(target: "horizon_disclosure::render", widget = request.name, "unmounted");
                RenderOutput::Nothing
            }
            RenderStrategy::Hidden => {
                element.attributes.set("hidden", "");
                element.attributes.set("style", "display: none");
                RenderOutput::Hidden(element)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(visible: bool, strategy: RenderStrategy, is_static: bool) -> RenderRequest<'static> {
        RenderRequest {
            props: Attributes::new().with("class", "panel"),
            slot: DisclosureSlot { open: visible },
            tag: None,
            default_tag: "div",
            name: "Test",
            visible,
            features: RenderFeatures::RENDER_STRATEGY | RenderFeatures::STATIC,
            strategy,
            is_static,
        }
    }

    #[test]
    fn test_owned_attributes_win() {
        let mut attrs = Attributes::new()
            .with("id", "caller")
            .with("aria-controls", "caller-panel")
            .with("class", "kept");

        attrs.set_owned("id", Some("owned".to_string()));
        attrs.set_owned("aria-controls", None);

        assert_eq!(attrs.get("id"), Some("owned"));
        assert!(!attrs.contains("aria-controls"));
        assert_eq!(attrs.get("class"), Some("kept"));
    }

    #[test]
    fn test_visible_renders() {
        let output = ElementRenderer::new().render(request(true, RenderStrategy::Unmount, false));
        let element = output.element().unwrap();
        assert_eq!(element.tag, "div");
        assert_eq!(element.attributes.get("class"), Some("panel"));
        assert!(matches!(output, RenderOutput::Rendered(_)));
    }

    #[test]
    fn test_invisible_unmounts_or_hides() {
        let mut renderer = ElementRenderer::new();
        assert_eq!(
            renderer.render(request(false, RenderStrategy::Unmount, false)),
            RenderOutput::Nothing
        );

        let hidden = renderer.render(request(false, RenderStrategy::Hidden, false));
        assert!(matches!(hidden, RenderOutput::Hidden(_)));
        assert!(hidden.element().unwrap().attributes.contains("hidden"));
    }

    #[test]
    fn test_static_ignores_visibility() {
        let output = ElementRenderer::new().render(request(false, RenderStrategy::Unmount, true));
        assert!(matches!(output, RenderOutput::Rendered(_)));
    }

    #[test]
    fn test_caller_tag_overrides_default() {
        let mut req = request(true, RenderStrategy::Unmount, false);
        req.tag = Some("section");
        assert_eq!(req.resolved_tag(), "section");
    }

    #[test]
    fn test_attributes_deserialize_from_map() {
        let attrs: Attributes = serde_json::from_str(r#"{"class": "faq", "data-kind": "x"}"#).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("data-kind"), Some("x"));
    }
}
