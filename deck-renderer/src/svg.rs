//! SVG serialisation of frames and pages.
//!
//! Text is wrapped with the same [`ApproxMetrics`] line breaking the layout
//! engine measured with, so exported blocks occupy the heights the layout
//! reserved for them.

use std::fmt::Write;

use deck_core::primitive::{ShapePlacement, TextAlign, TextPlacement};
use deck_core::text::{ApproxMetrics, TextStyle};
use deck_core::{Frame, Page, Primitive};

/// Render one frame as a standalone SVG document in frame coordinates.
#[must_use]
pub fn frame_svg(frame: &Frame, metrics: &ApproxMetrics) -> String {
    let (w, h) = (frame.width, frame.height);
    let mut svg = String::with_capacity(8192);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
    );
    write_frame_body(&mut svg, frame, metrics);
    svg.push_str("</svg>");
    svg
}

/// Render a whole page as one SVG, frames at their canvas offsets.
///
/// Each frame is a nested `<svg>` viewport, so its content is clipped to the
/// frame bounds.
#[must_use]
pub fn page_svg(page: &Page, metrics: &ApproxMetrics) -> String {
    let (x, y, w, h) = page.bounds().unwrap_or((0.0, 0.0, 1.0, 1.0));
    let mut svg = String::with_capacity(8192 * page.frames.len().max(1));
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{x} {y} {w} {h}\">",
    );
    let _ = write!(svg, "<title>{}</title>", escape_xml(&page.name));

    for frame in &page.frames {
        let _ = write!(
            svg,
            "<svg x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" overflow=\"hidden\">",
            frame.x, frame.y, frame.width, frame.height,
        );
        write_frame_body(&mut svg, frame, metrics);
        svg.push_str("</svg>");
    }

    svg.push_str("</svg>");
    svg
}

fn write_frame_body(svg: &mut String, frame: &Frame, metrics: &ApproxMetrics) {
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&frame.background),
    );
    for primitive in frame.primitives() {
        render_primitive(svg, primitive, metrics);
    }
}

/// Append the SVG for one primitive.
pub fn render_primitive(svg: &mut String, primitive: &Primitive, metrics: &ApproxMetrics) {
    match primitive {
        Primitive::Rect(shape) => {
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                shape.x, shape.y, shape.width, shape.height,
            );
            if shape.corner_radius > 0.0 {
                let _ = write!(svg, " rx=\"{}\"", shape.corner_radius);
            }
            write_fill(svg, shape);
        }
        Primitive::Ellipse(shape) => {
            let (rx, ry) = (shape.width / 2.0, shape.height / 2.0);
            let _ = write!(
                svg,
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{rx}\" ry=\"{ry}\"",
                shape.x + rx,
                shape.y + ry,
            );
            write_fill(svg, shape);
        }
        Primitive::Text(text) => render_text(svg, text, metrics),
    }
}

fn write_fill(svg: &mut String, shape: &ShapePlacement) {
    let _ = write!(svg, " fill=\"{}\"", escape_xml(&shape.fill));
    if shape.opacity < 1.0 {
        let _ = write!(svg, " fill-opacity=\"{}\"", shape.opacity);
    }
    svg.push_str("/>");
}

#[allow(clippy::cast_precision_loss)]
fn render_text(svg: &mut String, text: &TextPlacement, metrics: &ApproxMetrics) {
    let style = TextStyle {
        font: text.font.clone(),
        font_size: text.font_size,
        line_height: text.line_height,
        letter_spacing: text.letter_spacing.unwrap_or(0.0),
    };
    let pitch = style.line_pitch();
    let (anchor, x) = match text.align {
        TextAlign::Left => ("start", text.x),
        TextAlign::Center => ("middle", text.x + text.width / 2.0),
        TextAlign::Right => ("end", text.x + text.width),
    };

    let _ = write!(
        svg,
        "<text font-family=\"{}\" font-weight=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\"",
        escape_xml(&text.font.family),
        font_weight(&text.font.style),
        text.font_size,
        escape_xml(&text.color),
    );
    if let Some(spacing) = text.letter_spacing {
        let _ = write!(svg, " letter-spacing=\"{spacing}\"");
    }
    svg.push('>');

    // Baseline sits where the line box centres the em box.
    let first_baseline = text.y + (pitch - text.font_size) / 2.0 + text.font_size * 0.8;
    for (i, line) in metrics.lines(&text.content, &style, text.width).iter().enumerate() {
        let y = first_baseline + pitch * i as f32;
        let _ = write!(
            svg,
            "<tspan x=\"{x}\" y=\"{y}\">{}</tspan>",
            escape_xml(line)
        );
    }
    svg.push_str("</text>");
}

/// CSS weight for a font style name.
#[must_use]
pub fn font_weight(style: &str) -> u16 {
    match style {
        "Thin" => 100,
        "ExtraLight" => 200,
        "Light" => 300,
        "Medium" => 500,
        "SemiBold" => 600,
        "Bold" => 700,
        "ExtraBold" => 800,
        "Black" => 900,
        _ => 400,
    }
}

/// Escape special XML characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{FontDescriptor, FrameId};

    fn frame(primitives: Vec<Primitive>) -> Frame {
        Frame {
            id: FrameId(0),
            name: "01 - HERO".to_string(),
            x: 0.0,
            y: 0.0,
            width: 1920.0,
            height: 1080.0,
            background: "#0A0A0A".to_string(),
            clips_content: true,
            nodes: primitives
                .into_iter()
                .map(|primitive| deck_core::Node {
                    id: deck_core::NodeId::new(),
                    primitive,
                })
                .collect(),
        }
    }

    fn text(content: &str, width: f32, align: TextAlign) -> Primitive {
        Primitive::Text(TextPlacement {
            name: None,
            content: content.to_string(),
            font: FontDescriptor::new("Inter", "SemiBold"),
            font_size: 20.0,
            color: "#FFFFFF".to_string(),
            x: 100.0,
            y: 50.0,
            width,
            height: 24.0,
            line_height: None,
            letter_spacing: Some(2.0),
            align,
        })
    }

    #[test]
    fn test_frame_document() {
        let svg = frame_svg(&frame(vec![]), &ApproxMetrics::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 1920 1080\""));
        assert!(svg.contains("fill=\"#0A0A0A\""));
    }

    #[test]
    fn test_shapes() {
        let dot = ShapePlacement::new(10.0, 20.0, 6.0, 6.0, "#FF3B00").with_radius(3.0);
        let glow = ShapePlacement::new(0.0, 0.0, 600.0, 400.0, "#FF3B00").with_opacity(0.07);
        let svg = frame_svg(
            &frame(vec![Primitive::Rect(dot), Primitive::Ellipse(glow)]),
            &ApproxMetrics::default(),
        );
        assert!(svg.contains("<rect x=\"10\" y=\"20\" width=\"6\" height=\"6\" rx=\"3\" fill=\"#FF3B00\"/>"));
        assert!(svg.contains("<ellipse cx=\"300\" cy=\"200\" rx=\"300\" ry=\"200\""));
        assert!(svg.contains("fill-opacity=\"0.07\""));
    }

    #[test]
    fn test_text_wraps_into_tspans() {
        let svg = frame_svg(
            &frame(vec![text("alpha beta gamma delta", 120.0, TextAlign::Left)]),
            &ApproxMetrics::default(),
        );
        assert!(svg.matches("<tspan").count() > 1);
        assert!(svg.contains("font-weight=\"600\""));
        assert!(svg.contains("letter-spacing=\"2\""));
        assert!(svg.contains("text-anchor=\"start\""));
    }

    #[test]
    fn test_alignment_anchor() {
        let svg = frame_svg(
            &frame(vec![text("03", 960.0, TextAlign::Right)]),
            &ApproxMetrics::default(),
        );
        assert!(svg.contains("text-anchor=\"end\""));
        assert!(svg.contains("<tspan x=\"1060\""));
    }

    #[test]
    fn test_xml_escaping() {
        let svg = frame_svg(
            &frame(vec![text("A < B & \"C\"", 800.0, TextAlign::Left)]),
            &ApproxMetrics::default(),
        );
        assert!(svg.contains("A &lt; B &amp; &quot;C&quot;"));
    }

    #[test]
    fn test_page_nests_frames_at_offsets() {
        let mut second = frame(vec![]);
        second.x = 2000.0;
        second.name = "02 - QUOTE".to_string();
        let page = Page {
            name: "Deck & Co".to_string(),
            frames: vec![frame(vec![]), second],
        };
        let svg = page_svg(&page, &ApproxMetrics::default());
        assert!(svg.contains("viewBox=\"0 0 3920 1080\""));
        assert!(svg.contains("<svg x=\"2000\" y=\"0\""));
        assert!(svg.contains("<title>Deck &amp; Co</title>"));
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(font_weight("Regular"), 400);
        assert_eq!(font_weight("Light"), 300);
        assert_eq!(font_weight("Bold"), 700);
    }
}
