//! Icon catalog and the `sh-icon` element.
//!
//! Glyphs are stroke outlines on a 24px grid (Lucide geometry). Components reference
//! icons by their PascalCase token; an unknown token renders `CircleHelp`.

use element_runtime::prelude::*;

use crate::palette;
use crate::tokens::{IconColor, IconSize, Tone};

/// Tag of the icon element.
pub const TAG: &str = "sh-icon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Semantic icon identifiers available to components and host pages.
pub enum IconName {
    /// Question mark in a circle. Fallback for unknown names.
    #[default]
    CircleHelp,
    /// Magnifier.
    Search,
    /// Dismiss cross.
    X,
    /// Circular refresh arrows.
    RefreshCw,
    /// Rising chart line.
    TrendingUp,
    /// Falling chart line.
    TrendingDown,
    /// Eye.
    Eye,
    /// Pencil on a square.
    Edit,
    /// Trash can.
    Trash2,
    /// House.
    Home,
    /// Sparkles.
    Sparkles,
    /// Upward chevron.
    ChevronUp,
    /// Warning triangle.
    AlertTriangle,
    /// Arrow into a door.
    LogIn,
    /// Arrow out of a door.
    LogOut,
    /// Three horizontal bars.
    Menu,
    /// Painter's palette.
    Palette,
    /// Letter i in a circle.
    Info,
    /// Clock face.
    Clock,
    /// Parcel box.
    Package,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Path(&'static str),
    Circle(&'static str, &'static str, &'static str),
    Line(&'static str, &'static str, &'static str, &'static str),
    Polyline(&'static str),
}

impl Shape {
    fn node(self) -> RenderNode {
        let node = match self {
            Self::Path(d) => el("path").attr("d", d),
            Self::Circle(cx, cy, r) => el("circle").attr("cx", cx).attr("cy", cy).attr("r", r),
            Self::Line(x1, y1, x2, y2) => el("line")
                .attr("x1", x1)
                .attr("y1", y1)
                .attr("x2", x2)
                .attr("y2", y2),
            Self::Polyline(points) => el("polyline").attr("points", points),
        };
        node.into()
    }
}

impl IconName {
    fn shapes(self) -> &'static [Shape] {
        use Shape::*;
        match self {
            Self::CircleHelp => &[
                Circle("12", "12", "10"),
                Path("M9.09 9a3 3 0 0 1 5.83 1c0 2-3 3-3 3"),
                Path("M12 17h.01"),
            ],
            Self::Search => &[Circle("11", "11", "8"), Path("m21 21-4.3-4.3")],
            Self::X => &[Path("M18 6 6 18"), Path("m6 6 12 12")],
            Self::RefreshCw => &[
                Path("M3 12a9 9 0 0 1 9-9 9.75 9.75 0 0 1 6.74 2.74L21 8"),
                Path("M21 3v5h-5"),
                Path("M21 12a9 9 0 0 1-9 9 9.75 9.75 0 0 1-6.74-2.74L3 16"),
                Path("M8 16H3v5"),
            ],
            Self::TrendingUp => &[
                Polyline("22 7 13.5 15.5 8.5 10.5 2 17"),
                Polyline("16 7 22 7 22 13"),
            ],
            Self::TrendingDown => &[
                Polyline("22 17 13.5 8.5 8.5 13.5 2 7"),
                Polyline("16 17 22 17 22 11"),
            ],
            Self::Eye => &[
                Path("M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7Z"),
                Circle("12", "12", "3"),
            ],
            Self::Edit => &[
                Path("M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7"),
                Path("M18.5 2.5a2.121 2.121 0 0 1 3 3L12 15l-4 1 1-4 9.5-9.5z"),
            ],
            Self::Trash2 => &[
                Path("M3 6h18"),
                Path("M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6"),
                Path("M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2"),
                Line("10", "11", "10", "17"),
                Line("14", "11", "14", "17"),
            ],
            Self::Home => &[
                Path("m3 9 9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"),
                Polyline("9 22 9 12 15 12 15 22"),
            ],
            Self::Sparkles => &[
                Path("m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z"),
                Path("M5 3v4"),
                Path("M19 17v4"),
                Path("M3 5h4"),
                Path("M17 19h4"),
            ],
            Self::ChevronUp => &[Path("m18 15-6-6-6 6")],
            Self::AlertTriangle => &[
                Path("m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z"),
                Path("M12 9v4"),
                Path("M12 17h.01"),
            ],
            Self::LogIn => &[
                Path("M15 3h4a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2h-4"),
                Polyline("10 17 15 12 10 7"),
                Line("15", "12", "3", "12"),
            ],
            Self::LogOut => &[
                Path("M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"),
                Polyline("16 17 21 12 16 7"),
                Line("21", "12", "9", "12"),
            ],
            Self::Menu => &[
                Line("4", "12", "20", "12"),
                Line("4", "6", "20", "6"),
                Line("4", "18", "20", "18"),
            ],
            Self::Palette => &[
                Circle("13.5", "6.5", ".5"),
                Circle("17.5", "10.5", ".5"),
                Circle("8.5", "7.5", ".5"),
                Circle("6.5", "12.5", ".5"),
                Path("M12 2C6.5 2 2 6.5 2 12s4.5 10 10 10c.926 0 1.648-.746 1.648-1.688 0-.437-.18-.835-.437-1.125-.29-.289-.438-.652-.438-1.125a1.64 1.64 0 0 1 1.668-1.668h1.996c3.051 0 5.555-2.503 5.555-5.554C21.965 6.012 17.461 2 12 2z"),
            ],
            Self::Info => &[
                Circle("12", "12", "10"),
                Path("M12 16v-4"),
                Path("M12 8h.01"),
            ],
            Self::Clock => &[Circle("12", "12", "10"), Polyline("12 6 12 12 16 14")],
            Self::Package => &[
                Path("m7.5 4.27 9 5.15"),
                Path("M21 8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16Z"),
                Path("m3.3 7 8.7 5 8.7-5"),
                Path("M12 22V12"),
            ],
        }
    }
}

impl TokenEnum for IconName {
    const ALL: &'static [Self] = &[
        Self::CircleHelp,
        Self::Search,
        Self::X,
        Self::RefreshCw,
        Self::TrendingUp,
        Self::TrendingDown,
        Self::Eye,
        Self::Edit,
        Self::Trash2,
        Self::Home,
        Self::Sparkles,
        Self::ChevronUp,
        Self::AlertTriangle,
        Self::LogIn,
        Self::LogOut,
        Self::Menu,
        Self::Palette,
        Self::Info,
        Self::Clock,
        Self::Package,
    ];
    const TOKENS: &'static [&'static str] = &[
        "CircleHelp",
        "Search",
        "X",
        "RefreshCw",
        "TrendingUp",
        "TrendingDown",
        "Eye",
        "Edit",
        "Trash2",
        "Home",
        "Sparkles",
        "ChevronUp",
        "AlertTriangle",
        "LogIn",
        "LogOut",
        "Menu",
        "Palette",
        "Info",
        "Clock",
        "Package",
    ];

    fn token(self) -> &'static str {
        match self {
            Self::CircleHelp => "CircleHelp",
            Self::Search => "Search",
            Self::X => "X",
            Self::RefreshCw => "RefreshCw",
            Self::TrendingUp => "TrendingUp",
            Self::TrendingDown => "TrendingDown",
            Self::Eye => "Eye",
            Self::Edit => "Edit",
            Self::Trash2 => "Trash2",
            Self::Home => "Home",
            Self::Sparkles => "Sparkles",
            Self::ChevronUp => "ChevronUp",
            Self::AlertTriangle => "AlertTriangle",
            Self::LogIn => "LogIn",
            Self::LogOut => "LogOut",
            Self::Menu => "Menu",
            Self::Palette => "Palette",
            Self::Info => "Info",
            Self::Clock => "Clock",
            Self::Package => "Package",
        }
    }
}

struct IconElement;

impl Element for IconElement {
    fn render(&self, props: &PropertyStore) -> RenderNode {
        let name = props.token::<IconName>("name");
        let size = props.token::<IconSize>("size");
        let color = props.token::<IconColor>("color");
        let clickable = props.flag("clickable");
        let spin = props.flag("spin");

        el("svg")
            .part("icon")
            .class(format!(
                "icon {} {} {} {}",
                size.token(),
                color.token(),
                if clickable { "clickable" } else { "" },
                if spin { "spin" } else { "" },
            ))
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("viewBox", "0 0 24 24")
            .attr("fill", "none")
            .attr("stroke", "currentColor")
            .attr("stroke-width", "2")
            .attr("stroke-linecap", "round")
            .attr("stroke-linejoin", "round")
            .attr("data-icon", name.token())
            .attr_if("role", clickable.then_some("button"))
            .attr_if("tabindex", clickable.then_some("0"))
            .attr("aria-hidden", if clickable { "false" } else { "true" })
            .children(name.shapes().iter().map(|shape| shape.node()))
            .into()
    }
}

fn create() -> Box<dyn Element> {
    Box::new(IconElement)
}

fn styles() -> StyleSheet {
    let mut sheet = StyleSheet::new()
        .rule(
            StyleRule::new(":host")
                .decl("display", "inline-flex")
                .decl("align-items", "center")
                .decl("justify-content", "center")
                .decl("line-height", "0"),
        )
        .rule(
            StyleRule::new(".icon")
                .decl("display", "block")
                .decl("flex-shrink", "0"),
        )
        .rule(
            StyleRule::new(".clickable")
                .decl("cursor", "pointer")
                .decl("transition", format!("opacity {}", palette::TRANSITION_FAST)),
        )
        .rule(StyleRule::new(".clickable:hover").decl("opacity", "0.75"))
        .rule(StyleRule::new(".spin").decl("animation", "sh-spin 1s linear infinite"));

    for size in IconSize::ALL {
        sheet = sheet.rule(
            StyleRule::new(format!(".{}", size.token()))
                .decl("width", size.rem())
                .decl("height", size.rem()),
        );
    }

    let tones = [
        (IconColor::Success, Tone::Success),
        (IconColor::Warning, Tone::Warning),
        (IconColor::Danger, Tone::Danger),
    ];
    sheet = sheet.rule(StyleRule::new(".primary").decl("color", palette::BRAND));
    for (color, tone) in tones {
        let colors = palette::tone_colors(tone, Theme::Light);
        sheet = sheet.rule(
            StyleRule::new(format!(".{}", color.token())).decl("color", colors.foreground),
        );
    }
    sheet
        .rule(StyleRule::new(".muted").decl("color", palette::surface(Theme::Light).muted))
        .rule(StyleRule::new(".inherit").decl("color", "inherit"))
}

/// Definition of `sh-icon`.
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TagName::trusted(TAG), create)
        .properties(vec![
            PropertyDescriptor::token::<IconName>("name"),
            PropertyDescriptor::token::<IconSize>("size"),
            PropertyDescriptor::token::<IconColor>("color"),
            PropertyDescriptor::boolean("clickable", false),
            PropertyDescriptor::boolean("spin", false),
        ])
        .styles(styles())
}

#[cfg(test)]
mod tests {
    use element_runtime::{ElementRegistry, ElementRuntime};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted() -> (ElementRuntime, element_runtime::InstanceId) {
        let mut registry = ElementRegistry::new();
        registry.define(definition()).expect("define icon");
        let mut runtime = ElementRuntime::new(registry);
        let id = runtime.create_element(TAG).expect("create");
        runtime.flush();
        (runtime, id)
    }

    #[test]
    fn unknown_names_render_the_help_glyph() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "name", "Unicorn").expect("name");
        runtime.flush();

        let svg = runtime.part(id, "icon").expect("svg");
        assert_eq!(svg.attribute("data-icon"), Some("CircleHelp"));
        assert_eq!(svg.children.len(), 3);
        assert!(svg.has_class("md"));
        assert!(svg.has_class("inherit"));
    }

    #[test]
    fn clickable_icons_become_focusable_buttons() {
        let (mut runtime, id) = mounted();
        runtime.set_attribute(id, "name", "Search").expect("name");
        runtime.set_attribute(id, "clickable", "").expect("clickable");
        runtime.set_attribute(id, "size", "xl").expect("size");
        runtime.flush();

        let svg = runtime.part(id, "icon").expect("svg");
        assert_eq!(svg.attribute("data-icon"), Some("Search"));
        assert_eq!(svg.attribute("role"), Some("button"));
        assert_eq!(svg.attribute("tabindex"), Some("0"));
        assert!(svg.has_class("xl"));
    }

    #[test]
    fn every_icon_has_geometry() {
        for icon in IconName::ALL {
            assert!(!icon.shapes().is_empty(), "{} has no shapes", icon.token());
        }
    }
}
