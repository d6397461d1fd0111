//! 逐帧 SVG 合成 - 渲染层
//!
//! 把排版好的场景在某一帧的状态写成一个 SVG 文档。
//! 还没出场的元素直接省略，淡入中的元素带 opacity 属性。

use std::fmt::Write as _;

use super::scene::{RenderOptions, SceneElement, SceneLayout};

const BACKGROUND: &str = "#111827";
const EQUATION_COLOR: &str = "#f9fafb";
const EXPLANATION_COLOR: &str = "#9ca3af";
const ARROW_COLOR: &str = "#3b82f6";
const FONT_FAMILY: &str = "DejaVu Sans, Noto Sans CJK SC, sans-serif";

/// 合成某一帧的 SVG 文档
pub fn render_frame_svg(layout: &SceneLayout, frame: u32, opts: &RenderOptions) -> String {
    let mut svg = String::with_capacity(1024);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = opts.width,
        h = opts.height
    );
    // 不透明背景铺满画布，保证输出帧没有半透明像素
    let _ = write!(
        svg,
        r#"<rect width="{w}" height="{h}" fill="{bg}"/>"#,
        w = opts.width,
        h = opts.height,
        bg = BACKGROUND
    );

    for element in &layout.elements {
        let opacity = element_opacity(element.enter_frame(), layout.fade_frames, frame);
        if opacity <= 0.0 {
            continue;
        }

        match element {
            SceneElement::Equation { text, x, y, .. } => {
                let _ = write!(
                    svg,
                    r#"<text x="{x:.1}" y="{y:.1}" font-family="{ff}" font-size="40" fill="{fill}" opacity="{op:.3}">{text}</text>"#,
                    ff = FONT_FAMILY,
                    fill = EQUATION_COLOR,
                    op = opacity,
                    text = escape_xml(text)
                );
            }
            SceneElement::Explanation { text, x, y, .. } => {
                let _ = write!(
                    svg,
                    r#"<text x="{x:.1}" y="{y:.1}" font-family="{ff}" font-size="24" fill="{fill}" opacity="{op:.3}">{text}</text>"#,
                    ff = FONT_FAMILY,
                    fill = EXPLANATION_COLOR,
                    op = opacity,
                    text = escape_xml(text)
                );
            }
            SceneElement::Arrow { x, y_from, y_to, .. } => {
                // 箭杆加三角箭头
                let _ = write!(
                    svg,
                    r#"<line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="4" opacity="{op:.3}"/>"#,
                    y1 = y_from,
                    y2 = y_to - 10.0,
                    stroke = ARROW_COLOR,
                    op = opacity
                );
                let _ = write!(
                    svg,
                    r#"<path d="M {x0:.1} {y0:.1} L {x1:.1} {y0:.1} L {xm:.1} {y1:.1} Z" fill="{fill}" opacity="{op:.3}"/>"#,
                    x0 = x - 8.0,
                    x1 = x + 8.0,
                    xm = x,
                    y0 = y_to - 10.0,
                    y1 = y_to,
                    fill = ARROW_COLOR,
                    op = opacity
                );
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// 计算元素在某一帧的透明度
///
/// 出场前为 0，淡入期间线性上升，之后恒为 1。
fn element_opacity(enter_frame: u32, fade_frames: u32, frame: u32) -> f32 {
    if frame < enter_frame {
        return 0.0;
    }
    let elapsed = frame - enter_frame;
    if elapsed >= fade_frames {
        return 1.0;
    }
    (elapsed + 1) as f32 / (fade_frames + 1) as f32
}

/// 转义 XML 特殊字符
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;
    use crate::render::scene::build_scene;

    fn steps(n: usize) -> Vec<Step> {
        (0..n)
            .map(|i| Step {
                equation: format!("x_{} = {}", i, i),
                explanation: format!("说明 {}", i),
                narration: format!("旁白 {}。", i),
            })
            .collect()
    }

    #[test]
    fn test_final_frame_contains_all_elements() {
        let opts = RenderOptions::default();
        let layout = build_scene(&steps(3), &opts);
        let svg = render_frame_svg(&layout, layout.total_frames - 1, &opts);

        assert_eq!(svg.matches("<text").count(), 6, "3 个公式 + 3 个解释");
        assert_eq!(svg.matches("<line").count(), 2, "2 个箭杆");
    }

    #[test]
    fn test_first_frame_hides_not_yet_entered_elements() {
        let opts = RenderOptions::default();
        let layout = build_scene(&steps(3), &opts);
        let svg = render_frame_svg(&layout, 0, &opts);

        // 第 0 帧只有第一个公式刚开始淡入
        assert_eq!(svg.matches("<text").count(), 1);
        assert_eq!(svg.matches("<line").count(), 0);
    }

    #[test]
    fn test_text_is_xml_escaped() {
        let opts = RenderOptions::default();
        let steps = vec![Step {
            equation: "x < 1 & y > 2".to_string(),
            explanation: "比较 \"大小\"".to_string(),
            narration: "旁白。".to_string(),
        }];
        let layout = build_scene(&steps, &opts);
        let svg = render_frame_svg(&layout, layout.total_frames - 1, &opts);

        assert!(svg.contains("x &lt; 1 &amp; y &gt; 2"));
        assert!(svg.contains("&quot;大小&quot;"));
        assert!(!svg.contains("x < 1"));
    }

    #[test]
    fn test_opacity_ramps_from_zero_to_one() {
        assert_eq!(element_opacity(10, 15, 5), 0.0);
        let mid = element_opacity(10, 15, 17);
        assert!(mid > 0.0 && mid < 1.0, "淡入中途应该是半透明: {}", mid);
        assert_eq!(element_opacity(10, 15, 25), 1.0);
        assert_eq!(element_opacity(10, 15, 100), 1.0);
    }

    #[test]
    fn test_svg_document_is_well_formed_enough() {
        let opts = RenderOptions::default();
        let layout = build_scene(&steps(2), &opts);
        let svg = render_frame_svg(&layout, layout.total_frames - 1, &opts);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<rect width="1280" height="720""#));
    }
}
