use crate::color::Color;
use crate::component::{Component, ComponentKind, ImageSource, ImageStyle, TextStyle};
use crate::math::{Rect, Vector2};
use crate::node::Node;

/// The drawable target the dispatcher renders into. The engine only issues
/// primitive calls and clip changes; how they are rasterized is the
/// implementation's business. Geometry is in absolute surface pixels.
pub trait Surface {
    fn clip(&self) -> Option<Rect>;
    /// `None` disables clipping entirely.
    fn set_clip(&mut self, clip: Option<Rect>);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    fn line(&mut self, from: Vector2, to: Vector2, thickness: f32, color: Color);
    fn polygon(&mut self, points: &[Vector2], color: Color);
    fn circle(&mut self, center: Vector2, radius: f32, color: Color);
    fn text(&mut self, text: &str, style: &TextStyle, origin: Vector2);
    fn blit(&mut self, source: &ImageSource, style: &ImageStyle, dest: Rect);
}

/// Walks the finalized tree depth-first, siblings in ascending z, and
/// delegates each component to the surface. Culled and zero-area nodes
/// draw nothing themselves; their subtrees are still walked (a zero-size
/// anchor may parent visible, clip-disabled content).
pub(crate) fn draw_tree(nodes: &[Node], root: usize, surface: &mut dyn Surface) {
    draw_node(nodes, root, surface);
    surface.set_clip(None);
}

fn draw_node(nodes: &[Node], index: usize, surface: &mut dyn Surface) {
    let node = &nodes[index];
    if node.culled {
        return;
    }

    let drawable = !node.absolute_rect.is_empty();
    if drawable {
        surface.set_clip(node.clip);
        for component in &node.components {
            if !component.above_children {
                draw_component(surface, node.absolute_rect, component);
            }
        }
    }

    let mut order: Vec<usize> = node.children.iter().map(|&id| id as usize).collect();
    // Stable sort: equal z keeps declaration order.
    order.sort_by_key(|&child| nodes[child].z);
    for child in order {
        draw_node(nodes, child, surface);
    }

    if drawable {
        surface.set_clip(node.clip);
        for component in &node.components {
            if component.above_children {
                draw_component(surface, node.absolute_rect, component);
            }
        }
    }
}

fn draw_component(surface: &mut dyn Surface, rect: Rect, component: &Component) {
    let origin = rect.origin();
    match &component.kind {
        ComponentKind::Rect(style) => match style.outline {
            None => surface.fill_rect(rect, style.color),
            Some(thickness) => surface.stroke_rect(rect, thickness, style.color),
        },
        ComponentKind::Text(text, style) => surface.text(text, style, origin),
        ComponentKind::Image(source, style) => surface.blit(source, style, rect),
        ComponentKind::Line {
            from,
            to,
            thickness,
            color,
        } => surface.line(
            Vector2::new(origin.x + from.x, origin.y + from.y),
            Vector2::new(origin.x + to.x, origin.y + to.y),
            *thickness,
            *color,
        ),
        ComponentKind::Polygon { points, color } => {
            let translated: Vec<Vector2> = points
                .iter()
                .map(|p| Vector2::new(origin.x + p.x, origin.y + p.y))
                .collect();
            surface.polygon(&translated, *color);
        }
        ComponentKind::Circle {
            center,
            radius,
            color,
        } => surface.circle(
            Vector2::new(origin.x + center.x, origin.y + center.y),
            *radius,
            *color,
        ),
    }
}
