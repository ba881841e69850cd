use crate::component::{ComponentKind, ImageSource, ImageStyle, TextStyle};
use crate::error::UiError;
use crate::math::{Dimensions, Rect};
use crate::node::Node;
use crate::style::{Align, Anchor, Axis, Dim};

const EPSILON: f32 = 0.01;

pub(crate) type MeasureTextFn = dyn FnMut(&str, &TextStyle) -> Dimensions;
pub(crate) type MeasureImageFn = dyn FnMut(&ImageSource, &ImageStyle) -> Dimensions;

fn extent(rect: &Rect, axis: Axis) -> f32 {
    match axis {
        Axis::X => rect.width,
        Axis::Y => rect.height,
    }
}

fn set_extent(rect: &mut Rect, axis: Axis, value: f32) {
    match axis {
        Axis::X => rect.width = value,
        Axis::Y => rect.height = value,
    }
}

fn set_position(rect: &mut Rect, axis: Axis, value: f32) {
    match axis {
        Axis::X => rect.x = value,
        Axis::Y => rect.y = value,
    }
}

/// Offset of a content block of `content` inside `inner` space for an
/// anchor, plus the gap to advance between items.
fn anchor_offset(anchor: Anchor, inner: f32, content: f32) -> f32 {
    match anchor {
        Anchor::First | Anchor::MaxSpacing => 0.0,
        Anchor::Center => (inner - content) / 2.0,
        Anchor::Last => inner - content,
    }
}

fn align_offset(align: Align, inner: f32, item: f32) -> f32 {
    match align {
        Align::First => 0.0,
        Align::Center => (inner - item) / 2.0,
        Align::Last => inner - item,
    }
}

/// One packed line of a wrapping grid.
struct GridLine {
    children: Vec<usize>,
    primary: f32,
    secondary: f32,
}

/// Solves one node's subtree: sizes resize-to-content axes, distributes
/// leftover space among fill children, and assigns child positions. Called
/// by the tree builder the moment a container closes, so resize parents see
/// their children's settled sizes, and re-entered whenever a parent changes
/// this node's size afterwards.
pub(crate) struct Solver<'a> {
    pub nodes: &'a mut Vec<Node>,
    pub measure_text: &'a mut Option<Box<MeasureTextFn>>,
    pub measure_image: &'a mut Option<Box<MeasureImageFn>>,
}

impl Solver<'_> {
    pub fn solve(&mut self, index: usize) -> Result<(), UiError> {
        // Children first: resize-to-content needs their settled sizes.
        // Containers were already solved when they closed; leaves and
        // re-entered subtrees are solved here.
        let child_ids: Vec<usize> = self.nodes[index]
            .children
            .iter()
            .map(|&id| id as usize)
            .collect();
        for &child in &child_ids {
            if !self.nodes[child].solved {
                self.solve(child)?;
            }
        }

        if self.nodes[index].style.grid {
            self.solve_grid(index)?;
        } else {
            self.solve_flow(index)?;
        }
        self.nodes[index].solved = true;
        Ok(())
    }

    /// Largest intrinsic component size of a node, measured only when the
    /// node actually resizes to content. Text without a registered measurer
    /// is an error; images without one contribute nothing.
    fn measure_components(&mut self, index: usize) -> Result<Dimensions, UiError> {
        let style = &self.nodes[index].style;
        if style.resize[0].is_none() && style.resize[1].is_none() {
            return Ok(Dimensions::default());
        }
        let mut size = Dimensions::default();
        // Components are cloned out so the measure closures can borrow self
        // freely; component lists are small.
        let components: Vec<ComponentKind> = self.nodes[index]
            .components
            .iter()
            .map(|component| component.kind.clone())
            .collect();
        for kind in &components {
            let measured = match kind {
                ComponentKind::Text(text, text_style) => {
                    let measure = self
                        .measure_text
                        .as_mut()
                        .ok_or(UiError::TextMeasurerNotSet)?;
                    measure(text, text_style)
                }
                ComponentKind::Image(source, image_style) => match self.measure_image.as_mut() {
                    Some(measure) => measure(source, image_style),
                    None => Dimensions::default(),
                },
                _ => Dimensions::default(),
            };
            size.width = size.width.max(measured.width);
            size.height = size.height.max(measured.height);
        }
        Ok(size)
    }

    fn component_extent(size: Dimensions, axis: Axis) -> f32 {
        match axis {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    /// Linear flow: children along the primary axis, each aligned on the
    /// secondary per its own alignment.
    fn solve_flow(&mut self, index: usize) -> Result<(), UiError> {
        let style = self.nodes[index].style.clone();
        let primary = style.axis;
        let secondary = primary.cross();

        let layout_children: Vec<usize> = self.nodes[index]
            .children
            .iter()
            .map(|&id| id as usize)
            .filter(|&child| !self.nodes[child].style.ignore_layout)
            .collect();
        let count = layout_children.len();

        let component_size = self.measure_components(index)?;

        let inner_now =
            (extent(&self.nodes[index].rect, primary) - style.padding.along(primary)).max(0.0);
        let spacing = style.spacing.resolve(inner_now);
        let gaps_total = spacing * count.saturating_sub(1) as f32;

        let mut fixed_primary = 0.0;
        let mut biggest_secondary: f32 = 0.0;
        let mut fill_primary: Vec<usize> = Vec::new();
        for &child in &layout_children {
            if self.nodes[child].style.fill_on(primary).is_some() {
                fill_primary.push(child);
            } else {
                fixed_primary += extent(&self.nodes[child].rect, primary);
            }
            if self.nodes[child].style.fill_on(secondary).is_none() {
                biggest_secondary =
                    biggest_secondary.max(extent(&self.nodes[child].rect, secondary));
            }
        }

        // Resize-to-content grows (or shrinks) this node before any space
        // is handed out to fill children.
        if let Some(bounds) = style.resize_on(primary) {
            let content = (fixed_primary + gaps_total)
                .max(Self::component_extent(component_size, primary));
            let new = bounds.clamp(content + style.padding.along(primary));
            set_extent(&mut self.nodes[index].rect, primary, new);
        }
        if let Some(bounds) = style.resize_on(secondary) {
            let content =
                biggest_secondary.max(Self::component_extent(component_size, secondary));
            let new = bounds.clamp(content + style.padding.along(secondary));
            set_extent(&mut self.nodes[index].rect, secondary, new);
        }

        let inner_primary =
            (extent(&self.nodes[index].rect, primary) - style.padding.along(primary)).max(0.0);
        let inner_secondary =
            (extent(&self.nodes[index].rect, secondary) - style.padding.along(secondary)).max(0.0);

        // Percent spacing follows the settled extent, not the declared one;
        // a resize container may have grown from zero above.
        let spacing = style.spacing.resolve(inner_primary);
        let gaps_total = spacing * count.saturating_sub(1) as f32;

        // Leftover primary space is split among fill children in proportion
        // to their requests; oversubscription scales every request by one
        // shared multiplier, no per-child priority.
        let available = (inner_primary - fixed_primary - gaps_total).max(0.0);
        let mut requests: Vec<(usize, f32)> = Vec::with_capacity(fill_primary.len());
        let mut demand = 0.0;
        for &child in &fill_primary {
            let dim = self.nodes[child]
                .style
                .fill_on(primary)
                .unwrap_or(Dim::Px(0.0));
            let request = dim.resolve(available).max(0.0);
            demand += request;
            requests.push((child, request));
        }
        let scale = if demand > available + EPSILON && demand > 0.0 {
            available / demand
        } else {
            1.0
        };

        let mut resolve_again: Vec<usize> = Vec::new();
        for (child, request) in requests {
            let target = request * scale;
            if (extent(&self.nodes[child].rect, primary) - target).abs() > EPSILON {
                set_extent(&mut self.nodes[child].rect, primary, target);
                resolve_again.push(child);
            }
        }
        for &child in &layout_children {
            if let Some(dim) = self.nodes[child].style.fill_on(secondary) {
                let target = dim.resolve(inner_secondary).max(0.0);
                if (extent(&self.nodes[child].rect, secondary) - target).abs() > EPSILON {
                    set_extent(&mut self.nodes[child].rect, secondary, target);
                    if !resolve_again.contains(&child) {
                        resolve_again.push(child);
                    }
                }
            }
        }
        // Size changes cascade into the children's own children.
        for child in resolve_again {
            self.nodes[child].solved = false;
            self.solve(child)?;
        }

        // Primary placement in child order; the anchor shifts the start or,
        // for max-spacing, replaces the gap entirely.
        let mut children_extent = 0.0;
        for &child in &layout_children {
            children_extent += extent(&self.nodes[child].rect, primary);
        }
        let content_extent = children_extent + gaps_total;
        let gap = if style.anchor == Anchor::MaxSpacing && count > 1 {
            (inner_primary - children_extent) / (count - 1) as f32
        } else {
            spacing
        };
        let mut cursor = style.padding.start(primary)
            + anchor_offset(style.anchor, inner_primary, content_extent);
        for &child in &layout_children {
            set_position(&mut self.nodes[child].rect, primary, cursor);
            cursor += extent(&self.nodes[child].rect, primary) + gap;

            let child_align = self.nodes[child].style.align;
            let child_secondary = extent(&self.nodes[child].rect, secondary);
            let offset = align_offset(child_align, inner_secondary, child_secondary);
            set_position(
                &mut self.nodes[child].rect,
                secondary,
                style.padding.start(secondary) + offset,
            );
            biggest_secondary = biggest_secondary.max(child_secondary);
        }

        self.record_overflow(
            index,
            primary,
            (content_extent - inner_primary).max(0.0),
            (biggest_secondary.max(Self::component_extent(component_size, secondary))
                - inner_secondary)
                .max(0.0),
        );
        Ok(())
    }

    /// Wrapping grid: children bin-packed into lines along the primary
    /// axis, lines stacked along the secondary with anchor semantics.
    fn solve_grid(&mut self, index: usize) -> Result<(), UiError> {
        let style = self.nodes[index].style.clone();
        let primary = style.axis;
        let secondary = primary.cross();

        let layout_children: Vec<usize> = self.nodes[index]
            .children
            .iter()
            .map(|&id| id as usize)
            .filter(|&child| !self.nodes[child].style.ignore_layout)
            .collect();

        let mut inner_primary =
            (extent(&self.nodes[index].rect, primary) - style.padding.along(primary)).max(0.0);
        let mut inner_secondary =
            (extent(&self.nodes[index].rect, secondary) - style.padding.along(secondary)).max(0.0);
        let gap = style.spacing.resolve(inner_primary);
        let line_gap = style.spacing.resolve(inner_secondary);

        // Fill requests resolve against the padded box before packing.
        let mut resolve_again: Vec<usize> = Vec::new();
        for &child in &layout_children {
            let mut changed = false;
            if let Some(dim) = self.nodes[child].style.fill_on(primary) {
                let target = dim.resolve(inner_primary).max(0.0);
                if (extent(&self.nodes[child].rect, primary) - target).abs() > EPSILON {
                    set_extent(&mut self.nodes[child].rect, primary, target);
                    changed = true;
                }
            }
            if let Some(dim) = self.nodes[child].style.fill_on(secondary) {
                let target = dim.resolve(inner_secondary).max(0.0);
                if (extent(&self.nodes[child].rect, secondary) - target).abs() > EPSILON {
                    set_extent(&mut self.nodes[child].rect, secondary, target);
                    changed = true;
                }
            }
            if changed {
                resolve_again.push(child);
            }
        }
        for child in resolve_again {
            self.nodes[child].solved = false;
            self.solve(child)?;
        }

        // Greedy packing: a child joins the current line if it fits the
        // padded primary space, otherwise the line closes. A resize-enabled
        // container grows just enough (clamped) to admit a child that would
        // overflow even an empty line.
        let mut lines: Vec<GridLine> = Vec::new();
        let mut current = GridLine {
            children: Vec::new(),
            primary: 0.0,
            secondary: 0.0,
        };
        let mut widest_line: f32 = 0.0;
        for &child in &layout_children {
            let child_primary = extent(&self.nodes[child].rect, primary);
            let needed = if current.children.is_empty() {
                child_primary
            } else {
                current.primary + gap + child_primary
            };
            if needed > inner_primary + EPSILON {
                if current.children.is_empty() {
                    if let Some(bounds) = style.resize_on(primary) {
                        let grown = bounds.clamp(child_primary + style.padding.along(primary));
                        set_extent(&mut self.nodes[index].rect, primary, grown);
                        inner_primary = (grown - style.padding.along(primary)).max(0.0);
                    }
                    // Oversized children get a line of their own either way.
                } else {
                    widest_line = widest_line.max(current.primary);
                    lines.push(current);
                    current = GridLine {
                        children: Vec::new(),
                        primary: 0.0,
                        secondary: 0.0,
                    };
                }
            }
            current.primary = if current.children.is_empty() {
                child_primary
            } else {
                current.primary + gap + child_primary
            };
            current.secondary = current
                .secondary
                .max(extent(&self.nodes[child].rect, secondary));
            current.children.push(child);
        }
        if !current.children.is_empty() {
            widest_line = widest_line.max(current.primary);
            lines.push(current);
        }

        if let Some(bounds) = style.resize_on(primary) {
            let new = bounds.clamp(widest_line + style.padding.along(primary));
            set_extent(&mut self.nodes[index].rect, primary, new);
            inner_primary = (new - style.padding.along(primary)).max(0.0);
        }
        // Growth and clamping may have changed the extent percent spacing
        // resolves against; placement uses the settled value.
        let gap = style.spacing.resolve(inner_primary);

        let mut lines_extent = 0.0;
        for line in &lines {
            lines_extent += line.secondary;
        }
        let total_secondary = lines_extent + line_gap * lines.len().saturating_sub(1) as f32;
        if let Some(bounds) = style.resize_on(secondary) {
            let new = bounds.clamp(total_secondary + style.padding.along(secondary));
            set_extent(&mut self.nodes[index].rect, secondary, new);
            inner_secondary = (new - style.padding.along(secondary)).max(0.0);
        }
        let line_gap = style.spacing.resolve(inner_secondary);
        let total_secondary = lines_extent + line_gap * lines.len().saturating_sub(1) as f32;

        // Stack lines with anchor semantics, place children within each
        // line with the container's grid alignment.
        let stack_gap = if style.anchor == Anchor::MaxSpacing && lines.len() > 1 {
            (inner_secondary - lines_extent) / (lines.len() - 1) as f32
        } else {
            line_gap
        };
        let mut line_cursor = style.padding.start(secondary)
            + anchor_offset(style.anchor, inner_secondary, total_secondary);
        for line in &lines {
            let mut cursor = style.padding.start(primary)
                + align_offset(style.grid_align, inner_primary, line.primary);
            for &child in &line.children {
                set_position(&mut self.nodes[child].rect, primary, cursor);
                cursor += extent(&self.nodes[child].rect, primary) + gap;

                let child_align = self.nodes[child].style.align;
                let child_secondary = extent(&self.nodes[child].rect, secondary);
                set_position(
                    &mut self.nodes[child].rect,
                    secondary,
                    line_cursor + align_offset(child_align, line.secondary, child_secondary),
                );
            }
            line_cursor += line.secondary + stack_gap;
        }

        self.record_overflow(
            index,
            primary,
            (widest_line - inner_primary).max(0.0),
            (total_secondary - inner_secondary).max(0.0),
        );
        Ok(())
    }

    fn record_overflow(
        &mut self,
        index: usize,
        primary: Axis,
        primary_overflow: f32,
        secondary_overflow: f32,
    ) {
        let node = &mut self.nodes[index];
        match primary {
            Axis::X => {
                node.overflow.x = primary_overflow;
                node.overflow.y = secondary_overflow;
            }
            Axis::Y => {
                node.overflow.y = primary_overflow;
                node.overflow.x = secondary_overflow;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{Dimensions, Rect};
    use crate::style::{Align, Anchor, Axis, Dim, Style};
    use crate::{content, fill, Ui};

    fn ui() -> Ui {
        Ui::new(Dimensions::new(400.0, 400.0))
    }

    fn sized(width: f32, height: f32) -> Option<Rect> {
        Some(Rect::from_size(width, height))
    }

    // -------------------------------------------------------------
    // Linear flow
    // -------------------------------------------------------------

    #[test]
    fn two_half_fills_split_the_container() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(300.0, 100.0), &Style::new()).unwrap();
        let a = ui.element(None, &Style::new().fill_x(fill!(0.5))).unwrap();
        let b = ui.element(None, &Style::new().fill_x(fill!(0.5))).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(a.id).unwrap().width, 150.0);
        assert_eq!(ui.rect_of(b.id).unwrap().width, 150.0);
        assert_eq!(ui.rect_of(a.id).unwrap().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().x, 150.0);
    }

    #[test]
    fn fixed_children_are_subtracted_before_fills() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(300.0, 100.0), &Style::new()).unwrap();
        let fixed = ui.element(sized(100.0, 20.0), &Style::new()).unwrap();
        let flexible = ui.element(None, &Style::new().fill_x(fill!())).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(fixed.id).unwrap().width, 100.0);
        assert_eq!(ui.rect_of(flexible.id).unwrap().width, 200.0);
        assert_eq!(ui.rect_of(flexible.id).unwrap().x, 100.0);
    }

    #[test]
    fn oversubscribed_fills_scale_by_one_multiplier() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(300.0, 100.0), &Style::new()).unwrap();
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(ui.element(None, &Style::new().fill_x(fill!(0.5))).unwrap().id);
        }
        ui.end().unwrap();
        ui.end_frame().unwrap();

        // Demand 450 against 300 available: every request scaled by 2/3.
        let mut total = 0.0;
        for id in ids {
            let width = ui.rect_of(id).unwrap().width;
            assert!((width - 100.0).abs() < 0.01);
            total += width;
        }
        assert!((total - 300.0).abs() < 0.01);
    }

    #[test]
    fn spacing_separates_children() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(300.0, 100.0), &Style::new().spacing(10.0))
            .unwrap();
        let a = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        let b = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(a.id).unwrap().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().x, 60.0);
    }

    #[test]
    fn percent_spacing_resolves_against_the_padded_extent() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            sized(300.0, 100.0),
            &Style::new().spacing(Dim::Percent(0.1)),
        )
        .unwrap();
        let a = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        let b = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(a.id).unwrap().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().x, 80.0);
    }

    #[test]
    fn percent_spacing_tracks_a_resized_container() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            None,
            &Style::new()
                .resize_x(content!(100.0))
                .spacing(Dim::Percent(0.1)),
        )
        .unwrap();
        let a = ui.element(sized(20.0, 10.0), &Style::new()).unwrap();
        let b = ui.element(sized(20.0, 10.0), &Style::new()).unwrap();
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        // The container grows from zero to its clamp minimum; the percent
        // gap resolves against the grown extent, not the declared one.
        assert_eq!(closed.width, 100.0);
        assert_eq!(ui.rect_of(a.id).unwrap().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().x, 30.0);
    }

    #[test]
    fn vertical_flow_stacks_heights() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(100.0, 300.0), &Style::new().axis(Axis::Y))
            .unwrap();
        let a = ui.element(sized(40.0, 50.0), &Style::new()).unwrap();
        let b = ui.element(sized(40.0, 30.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(a.id).unwrap().y, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().y, 50.0);
    }

    #[test]
    fn anchors_shift_the_content_block() {
        for (anchor, expected_first, expected_second) in [
            (Anchor::First, 0.0, 50.0),
            (Anchor::Center, 100.0, 150.0),
            (Anchor::Last, 200.0, 250.0),
        ] {
            let mut ui = ui();
            ui.begin_frame();
            ui.begin(sized(300.0, 100.0), &Style::new().anchor(anchor))
                .unwrap();
            let a = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
            let b = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
            ui.end().unwrap();
            ui.end_frame().unwrap();

            assert_eq!(ui.rect_of(a.id).unwrap().x, expected_first, "{anchor:?}");
            assert_eq!(ui.rect_of(b.id).unwrap().x, expected_second, "{anchor:?}");
        }
    }

    #[test]
    fn max_spacing_pushes_children_apart() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            sized(300.0, 100.0),
            &Style::new().anchor(Anchor::MaxSpacing),
        )
        .unwrap();
        let a = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        let b = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(a.id).unwrap().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().x, 250.0);
    }

    #[test]
    fn per_child_alignment_on_the_secondary_axis() {
        for (align, expected_y) in [
            (Align::First, 0.0),
            (Align::Center, 30.0),
            (Align::Last, 60.0),
        ] {
            let mut ui = ui();
            ui.begin_frame();
            ui.begin(sized(300.0, 100.0), &Style::new()).unwrap();
            let child = ui
                .element(sized(50.0, 40.0), &Style::new().align(align))
                .unwrap();
            ui.end().unwrap();
            ui.end_frame().unwrap();

            assert_eq!(ui.rect_of(child.id).unwrap().y, expected_y, "{align:?}");
        }
    }

    #[test]
    fn padding_insets_children_and_resize_output() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            None,
            &Style::new()
                .resize_x(content!())
                .resize_y(content!())
                .padding(8.0),
        )
        .unwrap();
        let child = ui.element(sized(50.0, 20.0), &Style::new()).unwrap();
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(closed.size(), Dimensions::new(66.0, 36.0));
        assert_eq!(ui.rect_of(child.id).unwrap().origin().x, 8.0);
        assert_eq!(ui.rect_of(child.id).unwrap().origin().y, 8.0);
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(None, &Style::new().resize_x(content!(100.0, 110.0)))
            .unwrap();
        ui.element(sized(150.0, 20.0), &Style::new()).unwrap();
        let wide = ui.end().unwrap();
        ui.begin(None, &Style::new().resize_x(content!(100.0, 110.0)))
            .unwrap();
        ui.element(sized(20.0, 20.0), &Style::new()).unwrap();
        let narrow = ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(wide.width, 110.0);
        assert_eq!(narrow.width, 100.0);
    }

    #[test]
    fn fill_child_of_resize_parent_takes_the_leftover() {
        // Resize runs before fills: the parent settles at its fixed
        // content's size plus clamp, then the fill child gets the rest.
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(None, &Style::new().resize_x(content!(200.0)))
            .unwrap();
        let fixed = ui.element(sized(80.0, 20.0), &Style::new()).unwrap();
        let flexible = ui.element(None, &Style::new().fill_x(fill!())).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(fixed.id).unwrap().width, 80.0);
        assert_eq!(ui.rect_of(flexible.id).unwrap().width, 120.0);
    }

    #[test]
    fn size_change_cascades_into_grandchildren() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(300.0, 100.0), &Style::new()).unwrap();
        ui.begin(None, &Style::new().fill_x(fill!())).unwrap();
        let inner = ui.element(None, &Style::new().fill_x(fill!(0.5))).unwrap();
        ui.end().unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        // Middle container fills to 300 after it closed at 0; the inner
        // fill must be re-solved against the new size.
        assert_eq!(ui.rect_of(inner.id).unwrap().width, 150.0);
    }

    #[test]
    fn text_component_requires_a_measurer_only_when_resizing() {
        use crate::component::TextStyle;

        let mut ui = ui();
        ui.begin_frame();
        ui.begin(None, &Style::new().resize_x(content!())).unwrap();
        ui.text("hello", TextStyle::new()).unwrap();
        assert_eq!(ui.end(), Err(crate::UiError::TextMeasurerNotSet));

        // Fixed-size nodes never measure.
        let mut ui = self::ui();
        ui.begin_frame();
        ui.begin(sized(100.0, 30.0), &Style::new()).unwrap();
        ui.text("hello", TextStyle::new()).unwrap();
        assert!(ui.end().is_ok());
    }

    #[test]
    fn text_measurer_sizes_resize_containers() {
        use crate::component::TextStyle;

        let mut ui = ui();
        ui.set_text_measurer(|text, style| {
            Dimensions::new(text.len() as f32 * 10.0, style.font_size as f32)
        });
        ui.begin_frame();
        ui.begin(
            None,
            &Style::new().resize_x(content!()).resize_y(content!()),
        )
        .unwrap();
        ui.text("hello", TextStyle::new()).unwrap();
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(closed.size(), Dimensions::new(50.0, 16.0));
    }

    // -------------------------------------------------------------
    // Wrapping grid
    // -------------------------------------------------------------

    #[test]
    fn grid_wraps_when_a_line_is_full() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(100.0, 60.0), &Style::new().grid()).unwrap();
        let a = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        let b = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        let c = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(a.id).unwrap().origin().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().origin().x, 40.0);
        assert_eq!(ui.rect_of(a.id).unwrap().y, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().y, 0.0);
        // Third child starts the second line.
        assert_eq!(ui.rect_of(c.id).unwrap().origin().x, 0.0);
        assert_eq!(ui.rect_of(c.id).unwrap().y, 20.0);
    }

    #[test]
    fn grid_spacing_counts_toward_wrapping() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(100.0, 60.0), &Style::new().grid().spacing(30.0))
            .unwrap();
        let a = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        let b = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        // 40 + 30 + 40 exceeds 100, so the second child wraps and lines
        // are separated by the same spacing.
        assert_eq!(ui.rect_of(a.id).unwrap().y, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().origin().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().y, 50.0);
    }

    #[test]
    fn resize_grid_grows_for_an_oversized_child() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(None, &Style::new().grid().resize_x(content!(0.0, 100.0)))
            .unwrap();
        let big = ui.element(sized(150.0, 20.0), &Style::new()).unwrap();
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        // Growth is clamped; the child keeps its size and overflows.
        assert_eq!(closed.width, 100.0);
        assert_eq!(ui.rect_of(big.id).unwrap().width, 150.0);
        assert_eq!(ui.overflow_of(1).unwrap().x, 50.0);
    }

    #[test]
    fn resize_grid_shrinks_to_its_widest_line() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(None, &Style::new().grid().resize_x(content!(0.0, 100.0)))
            .unwrap();
        ui.element(sized(60.0, 20.0), &Style::new()).unwrap();
        ui.element(sized(60.0, 20.0), &Style::new()).unwrap();
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        // Each 60-wide child gets its own line within the 100 clamp; the
        // container settles at the widest line, not the clamp maximum.
        assert_eq!(closed.width, 60.0);
    }

    #[test]
    fn resize_grid_stacks_lines_on_the_secondary_axis() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            sized(100.0, 0.0),
            &Style::new().grid().resize_y(content!()).spacing(10.0),
        )
        .unwrap();
        for _ in 0..3 {
            ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        }
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        // Two lines of 20 plus one 10 gap.
        assert_eq!(closed.height, 50.0);
    }

    #[test]
    fn grid_percent_spacing_follows_the_clamped_extent() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            Some(Rect::from_size(200.0, 100.0)),
            &Style::new()
                .grid()
                .resize_x(content!())
                .spacing(Dim::Percent(0.25)),
        )
        .unwrap();
        let a = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        let b = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        let closed = ui.end().unwrap();
        ui.end_frame().unwrap();

        // Both children packed onto one line against the declared 200,
        // then the container shrank to that line; the placement gap is a
        // quarter of the clamped width, not of the declared one.
        assert_eq!(closed.width, 130.0);
        assert_eq!(ui.rect_of(a.id).unwrap().x, 0.0);
        assert_eq!(ui.rect_of(b.id).unwrap().x, 72.5);
    }

    #[test]
    fn grid_align_places_lines_on_the_primary_axis() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            sized(100.0, 60.0),
            &Style::new().grid().grid_align(Align::Center),
        )
        .unwrap();
        let child = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(child.id).unwrap().origin().x, 30.0);
    }

    #[test]
    fn grid_anchor_stacks_lines_from_the_far_edge() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(
            sized(100.0, 60.0),
            &Style::new().grid().anchor(Anchor::Last),
        )
        .unwrap();
        let child = ui.element(sized(40.0, 20.0), &Style::new()).unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        assert_eq!(ui.rect_of(child.id).unwrap().y, 40.0);
    }

    #[test]
    fn child_align_within_a_grid_line() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(100.0, 60.0), &Style::new().grid()).unwrap();
        ui.element(sized(40.0, 30.0), &Style::new()).unwrap();
        let small = ui
            .element(sized(40.0, 10.0), &Style::new().align(Align::Center))
            .unwrap();
        ui.end().unwrap();
        ui.end_frame().unwrap();

        // Line height is 30 from the tall sibling; the short child centers.
        assert_eq!(ui.rect_of(small.id).unwrap().y, 10.0);
    }

    // -------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------

    #[test]
    fn identical_declarations_produce_identical_geometry() {
        let declare = |ui: &mut Ui| {
            ui.begin_frame();
            ui.begin(sized(300.0, 200.0), &Style::new().spacing(5.0))
                .unwrap();
            ui.element(sized(50.0, 50.0), &Style::new()).unwrap();
            ui.element(None, &Style::new().fill_x(fill!(0.4))).unwrap();
            ui.begin(None, &Style::new().resize_x(content!()).resize_y(content!()))
                .unwrap();
            ui.element(sized(30.0, 30.0), &Style::new()).unwrap();
            ui.end().unwrap();
            ui.end().unwrap();
            ui.end_frame().unwrap();
        };

        let mut ui = ui();
        declare(&mut ui);
        let first: Vec<Rect> = (0..6).filter_map(|id| ui.rect_of(id)).collect();
        declare(&mut ui);
        let second: Vec<Rect> = (0..6).filter_map(|id| ui.rect_of(id)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn flow_children_never_overlap() {
        let mut ui = ui();
        ui.begin_frame();
        ui.begin(sized(300.0, 100.0), &Style::new().spacing(4.0))
            .unwrap();
        let mut ids = Vec::new();
        for width in [30.0, 70.0, 45.0] {
            ids.push(ui.element(sized(width, 20.0), &Style::new()).unwrap().id);
        }
        ui.end().unwrap();
        ui.end_frame().unwrap();

        for pair in ids.windows(2) {
            let left = ui.rect_of(pair[0]).unwrap();
            let right = ui.rect_of(pair[1]).unwrap();
            assert!(left.x + left.width <= right.x);
        }
    }
}
