//! A zoomable, scrollable view over laid-out features.
//!
//! A [`Viewport`] owns the features being displayed, the [`Transform`] that
//! maps them onto pixels, and the current [`Layout`]. It is the single place
//! where that state changes: setting features, zooming and resizing each
//! trigger a full layout pass so that lane packing always matches the current
//! scale.
//!
//! All coordinates taken and returned by the viewport are _content_ pixels:
//! the drawing is `content_width()` pixels wide and the host shows the
//! `base_width()`-pixel slice of it starting at `window_x()`.
//!
//! ```
//! use featuremap::feature::Feature;
//! use featuremap::feature::Span;
//! use featuremap::feature::Strand;
//! use featuremap::layout::Organizer;
//! use featuremap::selection::Event;
//! use featuremap::viewport::Mode;
//! use featuremap::viewport::Options;
//! use featuremap::viewport::Point;
//! use featuremap::viewport::Viewport;
//!
//! let options = Options {
//!     left_margin: 0,
//!     right_margin: 0,
//!     ..Default::default()
//! };
//!
//! let mut viewport = Viewport::try_new(1000, 500, options, Organizer::default())?;
//! viewport.set_features(vec![
//!     Feature::new("gene", Strand::Plus, Span::try_new(0, 100)?, "a"),
//!     Feature::new("gene", Strand::Plus, Span::try_new(150, 300)?, "b"),
//!     Feature::new("gene", Strand::Minus, Span::try_new(50, 200)?, "c"),
//! ]);
//!
//! assert_eq!(viewport.layout().lanes().len(), 2);
//!
//! // Drag across pixels 25 to 55 within the second lane.
//! viewport.press(Point::new(25, 20));
//! let event = viewport.release(Point::new(55, 20), Mode::Select);
//!
//! match event {
//!     Some(Event::ObjectWithRange { feature, from, to }) => {
//!         assert_eq!(viewport.feature(feature).unwrap().payload(), &"c");
//!         assert_eq!((from, to), (50, 111));
//!     }
//!     _ => unreachable!(),
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rust_lapper as lapper;
use tracing::debug;

pub mod geometry;
pub mod interaction;
pub mod options;

pub use geometry::Point;
pub use geometry::Rect;
pub use interaction::Drag;
pub use interaction::Mode;
pub use options::Options;

use crate::feature::Feature;
use crate::feature::FeatureId;
use crate::feature::Position;
use crate::feature::Span;
use crate::feature::Strand;
use crate::layout::Layout;
use crate::layout::Organizer;
use crate::selection::Broadcaster;
use crate::selection::Event;
use crate::selection::Selection;
use crate::selection::SubscriberId;
use crate::transform;
use crate::transform::Pixel;
use crate::transform::Transform;

/// An entry in the per-lane hit-testing index: a half-open range of pixel
/// columns and the position of the feature within its lane.
type Iv = lapper::Interval<u64, usize>;

/// An error related to a [`Viewport`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The sequence length and widths do not describe a valid transform.
    Transform(transform::Error),

    /// An option is out of its valid range.
    InvalidOption(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transform(err) => write!(f, "transform error: {err}"),
            Error::InvalidOption(option) => write!(f, "invalid option: {option}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A feature as it should be drawn.
#[derive(Debug)]
pub struct Glyph<'a, T> {
    /// The feature being drawn.
    pub feature: FeatureId,

    /// The rectangle from the start of the first segment to the end of the
    /// last segment.
    pub rect: Rect,

    /// One rectangle per segment.
    pub segments: Vec<Rect>,

    /// The strand of the feature.
    pub strand: Strand,

    /// The payload of the feature.
    pub payload: &'a T,

    /// Whether the feature is currently selected.
    pub selected: bool,
}

/// A lane as it should be drawn.
#[derive(Debug)]
pub struct LaneView<'a, T> {
    /// The position of the lane in display order.
    pub index: usize,

    /// The name of the category the lane belongs to.
    pub category: &'a str,

    /// The rectangle of the whole lane row.
    pub rect: Rect,

    /// The glyphs within the visible window.
    pub glyphs: Vec<Glyph<'a, T>>,
}

/// A zoomable, scrollable view over laid-out features.
#[derive(Debug)]
pub struct Viewport<T> {
    /// The display options.
    options: Options,

    /// The organizer used for every layout pass.
    organizer: Organizer,

    /// The current position to pixel mapping.
    transform: Transform,

    /// The left edge of the visible window.
    window_x: Pixel,

    /// The features on display.
    features: Vec<Feature<T>>,

    /// The current layout of `features`.
    layout: Layout,

    /// The hit-testing index of each lane in `layout`.
    index: Vec<lapper::Lapper<u64, usize>>,

    /// The current selection.
    selection: Selection,

    /// The pointer gesture in progress, if any.
    drag: Option<Drag>,

    /// The selection listeners.
    broadcaster: Broadcaster,
}

impl<T> Viewport<T> {
    /// Attempts to create a new, empty [`Viewport`] over a sequence of
    /// `sequence_length` positions shown in a window `width` pixels wide.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::layout::Organizer;
    /// use featuremap::viewport::Options;
    /// use featuremap::viewport::Viewport;
    ///
    /// let viewport = Viewport::<()>::try_new(1000, 520, Options::default(), Organizer::default())?;
    /// assert_eq!(viewport.transform().scale(), 0.5);
    ///
    /// assert!(Viewport::<()>::try_new(0, 520, Options::default(), Organizer::default()).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        sequence_length: u64,
        width: Pixel,
        options: Options,
        organizer: Organizer,
    ) -> Result<Self> {
        if options.lane_height <= 0 {
            return Err(Error::InvalidOption("lane height must be positive"));
        }

        if options.lane_gap < 0 || options.top_margin < 0 || options.click_tolerance < 0 {
            return Err(Error::InvalidOption(
                "lane gap, top margin and click tolerance cannot be negative",
            ));
        }

        if !options.zoom_step.is_finite() || options.zoom_step <= 1.0 {
            return Err(Error::InvalidOption("zoom step must be greater than one"));
        }

        if !options.max_pixels_per_position.is_finite() || options.max_pixels_per_position <= 0.0
        {
            return Err(Error::InvalidOption(
                "max pixels per position must be positive",
            ));
        }

        let transform = Transform::try_new(
            sequence_length,
            width,
            options.left_margin,
            options.right_margin,
            1.0,
        )
        .map_err(Error::Transform)?;

        Ok(Self {
            options,
            organizer,
            transform,
            window_x: 0,
            features: Vec::new(),
            layout: Layout::default(),
            index: Vec::new(),
            selection: Selection::Empty,
            drag: None,
            broadcaster: Broadcaster::default(),
        })
    }

    ////////////////////////////////////////////////////////////////////////////////////
    // State
    ////////////////////////////////////////////////////////////////////////////////////

    /// Replaces the features on display and lays them out.
    ///
    /// Any selection refers to the previous features, so a non-empty
    /// selection is cleared and listeners are told so.
    pub fn set_features(&mut self, features: Vec<Feature<T>>) {
        self.features = features;
        self.drag = None;

        if !self.selection.is_empty() {
            self.set_selection(Selection::Empty);
        }

        self.relayout();
    }

    /// Gets the display options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Gets the current transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Gets the current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Gets the features on display.
    pub fn features(&self) -> &[Feature<T>] {
        &self.features
    }

    /// Gets a feature by its identifier.
    pub fn feature(&self, id: FeatureId) -> Option<&Feature<T>> {
        self.features.get(id.index())
    }

    /// Gets the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Gets the width of the visible window, which is also the narrowest the
    /// content can be.
    pub fn base_width(&self) -> Pixel {
        self.transform.display_width()
    }

    /// Gets the width of the whole drawing at the current zoom.
    pub fn content_width(&self) -> Pixel {
        self.transform.content_width()
    }

    /// Gets the height of the whole drawing.
    pub fn content_height(&self) -> Pixel {
        match self.layout.lanes().len() {
            0 => self.options.top_margin,
            n => self.lane_top(n) - self.options.lane_gap,
        }
    }

    /// Gets the widest the content can be zoomed to.
    pub fn max_width(&self) -> Pixel {
        max_content_width(&self.transform, &self.options)
    }

    /// Gets the current zoom multiplier.
    pub fn zoom_factor(&self) -> f64 {
        self.transform.zoom()
    }

    /// Gets the left edge of the visible window.
    pub fn window_x(&self) -> Pixel {
        self.window_x
    }

    /// Gets the rectangle of the visible window.
    pub fn window(&self) -> Rect {
        Rect::new(
            self.window_x,
            0,
            self.base_width(),
            self.content_height().max(1),
        )
    }

    /// Gets the range of sequence positions under the visible window.
    pub fn visible_span(&self) -> Span {
        self.transform
            .positions_between(self.window_x, self.window_x + self.base_width() - 1)
    }

    ////////////////////////////////////////////////////////////////////////////////////
    // Zooming, panning and resizing
    ////////////////////////////////////////////////////////////////////////////////////

    /// Multiplies the content width by `factor`, keeping the sequence
    /// position under `anchor` at the same place within the visible window.
    ///
    /// Factors above one zoom in and factors below one zoom out. The new
    /// width is clamped between [`Viewport::base_width()`] and
    /// [`Viewport::max_width()`]. If clamping leaves the width unchanged, or
    /// `factor` is not a positive number, nothing happens apart from
    /// dropping any pointer gesture in progress. Returns whether the zoom
    /// changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuremap::layout::Organizer;
    /// use featuremap::viewport::Options;
    /// use featuremap::viewport::Viewport;
    ///
    /// let options = Options {
    ///     left_margin: 0,
    ///     right_margin: 0,
    ///     ..Default::default()
    /// };
    /// let mut viewport = Viewport::<()>::try_new(1000, 500, options, Organizer::default())?;
    ///
    /// // Pixel 200 shows position 400; it stays 200 pixels into the window.
    /// assert!(viewport.zoom(2.0, 200));
    /// assert_eq!(viewport.content_width(), 1000);
    /// assert_eq!(viewport.window_x(), 200);
    /// assert_eq!(viewport.hit_test(viewport.window_x() + 200), 400);
    ///
    /// // Already at the narrowest width.
    /// assert!(viewport.zoom(0.5, 400));
    /// assert!(!viewport.zoom(0.5, 200));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn zoom(&mut self, factor: f64, anchor: Pixel) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            self.drag = None;
            return false;
        }

        let old_width = self.content_width();
        let new_width = ((old_width as f64 * factor).round() as Pixel)
            .clamp(self.base_width(), self.max_width());

        if new_width == old_width {
            debug!(width = old_width, factor, "zoom left the width unchanged");
            self.drag = None;
            return false;
        }

        let left = self.transform.left_margin();
        let margins = left + self.transform.right_margin();
        let anchored = (anchor as f64 - left as f64) / self.transform.scale();
        let offset = anchor.saturating_sub(self.window_x);

        let zoom = (new_width - margins) as f64 / (self.base_width() - margins) as f64;
        self.transform = self.transform.rezoomed(zoom);

        let moved = left as f64 + anchored * self.transform.scale();
        self.window_x = self.clamp_window((moved.round() as Pixel).saturating_sub(offset));

        debug!(
            from = old_width,
            to = new_width,
            zoom,
            window = self.window_x,
            "zoomed"
        );

        self.relayout();
        true
    }

    /// Zooms in by one step around `anchor`.
    pub fn zoom_in(&mut self, anchor: Pixel) -> bool {
        self.zoom(self.options.zoom_step, anchor)
    }

    /// Zooms out by one step around `anchor`.
    pub fn zoom_out(&mut self, anchor: Pixel) -> bool {
        self.zoom(1.0 / self.options.zoom_step, anchor)
    }

    /// Zooms so that the pixel columns between `from` and `to` fill the
    /// visible window, then scrolls the window to the start of that span.
    pub fn zoom_to_span(&mut self, from: Pixel, to: Pixel) -> bool {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };

        let left = self.transform.left_margin();
        let anchored = (from as f64 - left as f64) / self.transform.scale();
        let factor = self.base_width() as f64 / (to as f64 - from as f64 + 1.0);

        let changed = self.zoom(factor, from);
        let start = left as f64 + anchored * self.transform.scale();
        self.pan_to(start.round() as Pixel);

        changed
    }

    /// Scrolls the visible window so that it starts at `pixel`, as far as the
    /// content allows.
    pub fn pan_to(&mut self, pixel: Pixel) {
        self.window_x = self.clamp_window(pixel);
    }

    /// Scrolls the visible window by `delta` pixels.
    pub fn pan_by(&mut self, delta: Pixel) {
        self.pan_to(self.window_x.saturating_add(delta));
    }

    /// Changes the width of the visible window.
    ///
    /// The zoom multiplier is kept unless the new width would push the
    /// content past [`Viewport::max_width()`].
    pub fn resize(&mut self, width: Pixel) -> Result<()> {
        let transform = Transform::try_new(
            self.transform.sequence_length(),
            width,
            self.transform.left_margin(),
            self.transform.right_margin(),
            1.0,
        )
        .map_err(Error::Transform)?;

        let margins = transform.left_margin() + transform.right_margin();
        let max_zoom = (max_content_width(&transform, &self.options) - margins) as f64
            / (width - margins) as f64;
        let zoom = self.transform.zoom().min(max_zoom);

        self.transform = transform.rezoomed(zoom);
        self.window_x = self.clamp_window(self.window_x);
        self.drag = None;

        debug!(width, zoom, "resized");

        self.relayout();
        Ok(())
    }

    ////////////////////////////////////////////////////////////////////////////////////
    // Geometry and hit testing
    ////////////////////////////////////////////////////////////////////////////////////

    /// Gets the sequence position under a pixel column.
    pub fn hit_test(&self, pixel: Pixel) -> Position {
        self.transform.position_at(pixel)
    }

    /// Gets the range of sequence positions under the pixel columns between
    /// `from` and `to`, in either order.
    pub fn hit_test_span(&self, from: Pixel, to: Pixel) -> Span {
        self.transform.positions_between(from, to)
    }

    /// Gets the top edge of the lane at `index`.
    pub fn lane_top(&self, index: usize) -> Pixel {
        self.options.top_margin + index as Pixel * self.options.lane_pitch()
    }

    /// Gets the index of the lane under the pixel row `y`, if any.
    ///
    /// Rows in the gaps between lanes belong to no lane.
    pub fn lane_at(&self, y: Pixel) -> Option<usize> {
        let offset = y.saturating_sub(self.options.top_margin);
        if offset < 0 {
            return None;
        }

        let pitch = self.options.lane_pitch();
        if offset % pitch >= self.options.lane_height {
            return None;
        }

        let index = (offset / pitch) as usize;
        (index < self.layout.lanes().len()).then_some(index)
    }

    /// Gets the rectangle a feature is drawn in.
    ///
    /// Features that are not part of the current layout have no rectangle.
    pub fn feature_rect(&self, id: FeatureId) -> Option<Rect> {
        let (lane, _) = self.layout.locate(id)?;
        let feature = self.feature(id)?;
        let (start, end) = self.transform.project_feature(feature);

        Some(self.columns_rect(lane, start, end))
    }

    /// Gets the feature drawn at `point`, if any.
    pub fn feature_at(&self, point: Point) -> Option<FeatureId> {
        let lane = self.lane_at(point.y)?;
        self.first_in_columns(lane, point.x, point.x)
    }

    /// Gets the rectangles that should be highlighted for the current
    /// selection.
    pub fn selected_rects(&self) -> Vec<Rect> {
        match &self.selection {
            Selection::Empty => Vec::new(),
            Selection::Single { feature, span } => {
                let (Some((lane, _)), Some(spanned)) = (self.layout.locate(*feature), span) else {
                    return self.feature_rect(*feature).into_iter().collect();
                };

                let (start, end) = self.transform.project(spanned);
                vec![self.columns_rect(lane, start, end)]
            }
            Selection::Multiple { feature, spans } => match self.layout.locate(*feature) {
                Some((lane, _)) => spans
                    .iter()
                    .map(|span| {
                        let (start, end) = self.transform.project(span);
                        self.columns_rect(lane, start, end)
                    })
                    .collect(),
                None => Vec::new(),
            },
        }
    }

    /// Calls `painter` once per lane, in display order, with the glyphs that
    /// fall within the visible window.
    pub fn render<F>(&self, mut painter: F)
    where
        F: FnMut(&LaneView<'_, T>),
    {
        let (from, to) = (self.window_x, self.window_x + self.base_width() - 1);
        let selected = self.selection.feature();

        for (index, lane) in self.layout.lanes().iter().enumerate() {
            let glyphs = lane
                .resolve(&self.features)
                .filter_map(|(id, feature)| {
                    let (start, end) = self.transform.project_feature(feature);
                    let rect = self.columns_rect(index, start, end);

                    if !rect.overlaps_columns(from, to) {
                        return None;
                    }

                    let segments = feature
                        .segments()
                        .iter()
                        .map(|segment| {
                            let (start, end) = self.transform.project(segment);
                            self.columns_rect(index, start, end)
                        })
                        .collect();

                    Some(Glyph {
                        feature: id,
                        rect,
                        segments,
                        strand: feature.strand(),
                        payload: feature.payload(),
                        selected: selected == Some(id),
                    })
                })
                .collect();

            painter(&LaneView {
                index,
                category: lane.category(),
                rect: Rect::new(
                    0,
                    self.lane_top(index),
                    self.content_width(),
                    self.options.lane_height,
                ),
                glyphs,
            });
        }
    }

    ////////////////////////////////////////////////////////////////////////////////////
    // Interaction and selection
    ////////////////////////////////////////////////////////////////////////////////////

    /// Starts a pointer gesture at `point`.
    pub fn press(&mut self, point: Point) {
        self.drag = Some(Drag::start(point));
    }

    /// Moves the pointer of the gesture in progress to `point`.
    pub fn drag_to(&mut self, point: Point) {
        if let Some(drag) = self.drag.as_mut() {
            drag.update(point);
        }
    }

    /// Gets the rectangle swept by the gesture in progress, if any.
    pub fn pending_drag(&self) -> Option<Rect> {
        self.drag.map(|drag| drag.rect())
    }

    /// Abandons the gesture in progress.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Completes the gesture in progress at `point`.
    ///
    /// In [`Mode::Select`], the new selection is announced to listeners and
    /// the announced event is returned:
    ///
    /// - a click on a feature yields [`Event::Object`],
    /// - a drag starting in a lane yields [`Event::ObjectWithRange`] over the
    ///   first feature in that lane under the dragged columns, and
    /// - anything else yields [`Event::Empty`].
    ///
    /// The zoom modes zoom instead and return [`None`]. A release without a
    /// preceding press is treated as a click at `point`.
    pub fn release(&mut self, point: Point, mode: Mode) -> Option<Event> {
        let mut drag = self.drag.take().unwrap_or_else(|| Drag::start(point));
        drag.update(point);

        let click = drag.is_click(self.options.click_tolerance);

        match mode {
            Mode::Select => {
                let selection = match click {
                    true => self
                        .feature_at(point)
                        .map(|id| Selection::of_feature(id, &self.features[id.index()]))
                        .unwrap_or_default(),
                    false => self.select_columns(drag.origin(), point),
                };

                Some(self.set_selection(selection))
            }
            Mode::ZoomIn => {
                match click {
                    true => self.zoom_in(point.x),
                    false => self.zoom_to_span(drag.origin().x, point.x),
                };

                None
            }
            Mode::ZoomOut => {
                self.zoom_out(point.x);
                None
            }
        }
    }

    /// Selects a whole feature and announces it, returning the announced
    /// event.
    ///
    /// Features that are not part of the current layout cannot be selected.
    pub fn select(&mut self, id: FeatureId) -> Option<Event> {
        self.layout.locate(id)?;
        let selection = Selection::of_feature(id, self.feature(id)?);
        Some(self.set_selection(selection))
    }

    /// Clears the selection and announces it.
    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::Empty);
    }

    /// Registers a selection listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: FnMut(&Event) + 'static,
    {
        self.broadcaster.subscribe(listener)
    }

    /// Removes a selection listener, returning whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    ////////////////////////////////////////////////////////////////////////////////////
    // Internals
    ////////////////////////////////////////////////////////////////////////////////////

    /// Lays the features out again under the current transform.
    fn relayout(&mut self) {
        self.layout = self.organizer.organize(&self.features, &self.transform);
        self.index = build_index(&self.layout, &self.features, &self.transform);
    }

    /// Replaces the selection and announces it.
    fn set_selection(&mut self, selection: Selection) -> Event {
        self.selection = selection;

        let event = self.selection.to_event();
        self.broadcaster.publish(&event);
        event
    }

    /// Selects the range of positions dragged over from `origin` to `point`,
    /// over the first feature in the lane where the drag started.
    fn select_columns(&self, origin: Point, point: Point) -> Selection {
        let (from, to) = (origin.x.min(point.x), origin.x.max(point.x));

        self.lane_at(origin.y)
            .and_then(|lane| self.first_in_columns(lane, from, to))
            .map(|id| Selection::of_range(id, self.hit_test_span(from, to)))
            .unwrap_or_default()
    }

    /// Finds the first feature, in lane order, drawn within the columns
    /// `from..=to` of `lane`.
    fn first_in_columns(&self, lane: usize, from: Pixel, to: Pixel) -> Option<FeatureId> {
        if to < 0 {
            return None;
        }

        let from = from.max(0) as u64;
        let to = to as u64;

        self.index[lane]
            .find(from, to + 1)
            .map(|iv| iv.val)
            .min()
            .map(|position| self.layout.lanes()[lane].features()[position])
    }

    /// Gets the rectangle covering the columns `start..=end` of a lane.
    fn columns_rect(&self, lane: usize, start: Pixel, end: Pixel) -> Rect {
        Rect::new(
            start,
            self.lane_top(lane),
            end - start + 1,
            self.options.lane_height,
        )
    }

    /// Clamps the left edge of the visible window onto the content.
    fn clamp_window(&self, x: Pixel) -> Pixel {
        x.clamp(0, (self.content_width() - self.base_width()).max(0))
    }
}

/// Gets the widest the content of `transform` can be zoomed to.
fn max_content_width(transform: &Transform, options: &Options) -> Pixel {
    let margins = transform.left_margin() + transform.right_margin();
    let stretched = (transform.sequence_length() as f64 * options.max_pixels_per_position).round()
        as Pixel
        + margins;

    stretched.max(transform.display_width())
}

/// Builds the hit-testing index for every lane of `layout`.
fn build_index<T>(
    layout: &Layout,
    features: &[Feature<T>],
    transform: &Transform,
) -> Vec<lapper::Lapper<u64, usize>> {
    layout
        .lanes()
        .iter()
        .map(|lane| {
            let intervals = lane
                .resolve(features)
                .enumerate()
                .flat_map(|(position, (_, feature))| {
                    feature.segments().iter().map(move |segment| {
                        let (start, end) = transform.project(segment);

                        Iv {
                            start: start.max(0) as u64,
                            stop: end.max(0) as u64 + 1,
                            val: position,
                        }
                    })
                })
                .collect::<Vec<_>>();

            lapper::Lapper::new(intervals)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::organizer;

    fn options() -> Options {
        Options {
            left_margin: 0,
            right_margin: 0,
            ..Default::default()
        }
    }

    fn feature(category: &str, start: u64, end: u64, name: &'static str) -> Feature<&'static str> {
        Feature::new(
            category,
            Strand::Plus,
            Span::try_new(start, end).unwrap(),
            name,
        )
    }

    /// The example from the crate documentation: lane 0 holds `a` and `b`,
    /// lane 1 holds `c`.
    fn example() -> Viewport<&'static str> {
        let mut viewport = Viewport::try_new(1000, 500, options(), Organizer::default()).unwrap();
        viewport.set_features(vec![
            feature("gene", 0, 100, "a"),
            feature("gene", 150, 300, "b"),
            feature("gene", 50, 200, "c"),
        ]);
        viewport
    }

    fn recorder(viewport: &mut Viewport<&'static str>) -> Rc<RefCell<Vec<Event>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        viewport.subscribe(move |event: &Event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn test_invalid_options() {
        let options = Options {
            zoom_step: 1.0,
            ..Default::default()
        };
        let err = Viewport::<()>::try_new(1000, 500, options, Organizer::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid option: zoom step must be greater than one"
        );

        let err =
            Viewport::<()>::try_new(1000, 15, Options::default(), Organizer::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Transform(transform::Error::NoDrawableWidth { .. })
        ));
    }

    #[test]
    fn test_feature_rects() {
        let viewport = example();

        assert_eq!(viewport.feature_rect(FeatureId(0)), Some(Rect::new(0, 0, 51, 12)));
        assert_eq!(viewport.feature_rect(FeatureId(1)), Some(Rect::new(75, 0, 76, 12)));
        assert_eq!(viewport.feature_rect(FeatureId(2)), Some(Rect::new(25, 16, 76, 12)));
        assert_eq!(viewport.feature_rect(FeatureId(3)), None);
        assert_eq!(viewport.content_height(), 28);
    }

    #[test]
    fn test_lane_at() {
        let viewport = example();

        assert_eq!(viewport.lane_at(-1), None);
        assert_eq!(viewport.lane_at(0), Some(0));
        assert_eq!(viewport.lane_at(11), Some(0));
        assert_eq!(viewport.lane_at(12), None);
        assert_eq!(viewport.lane_at(16), Some(1));
        assert_eq!(viewport.lane_at(27), Some(1));
        assert_eq!(viewport.lane_at(32), None);
    }

    #[test]
    fn test_extreme_pointer_positions() {
        let options = Options {
            top_margin: 5,
            left_margin: 10,
            right_margin: 10,
            ..Default::default()
        };
        let mut viewport = Viewport::try_new(1000, 520, options, Organizer::default()).unwrap();
        viewport.set_features(vec![feature("gene", 0, 999, "a")]);

        assert_eq!(viewport.lane_at(Pixel::MIN), None);
        assert_eq!(viewport.lane_at(Pixel::MAX), None);
        assert_eq!(viewport.hit_test(Pixel::MIN), 0);
        assert_eq!(viewport.hit_test(Pixel::MAX), 999);

        let span = viewport.hit_test_span(Pixel::MIN, Pixel::MAX);
        assert_eq!((span.start(), span.end()), (0, 999));

        assert_eq!(viewport.feature_at(Point::new(Pixel::MIN, 6)), None);
        assert_eq!(viewport.feature_at(Point::new(Pixel::MAX, 6)), None);

        viewport.press(Point::new(Pixel::MIN, 6));
        let event = viewport.release(Point::new(Pixel::MAX, 6), Mode::Select);
        assert_eq!(
            event,
            Some(Event::ObjectWithRange {
                feature: FeatureId(0),
                from: 0,
                to: 999,
            })
        );

        viewport.pan_by(Pixel::MAX);
        assert_eq!(viewport.window_x(), 0);
        viewport.pan_by(Pixel::MIN);
        assert_eq!(viewport.window_x(), 0);

        assert!(viewport.zoom(2.0, Pixel::MAX));
        assert!((0..=viewport.content_width() - viewport.base_width()).contains(&viewport.window_x()));
    }

    #[test]
    fn test_click_selection() {
        let mut viewport = example();
        let events = recorder(&mut viewport);

        viewport.press(Point::new(30, 5));
        let event = viewport.release(Point::new(31, 6), Mode::Select);
        assert_eq!(event, Some(Event::Object(FeatureId(0))));
        assert_eq!(viewport.selection().feature(), Some(FeatureId(0)));

        // Between the two glyphs of lane 0.
        viewport.press(Point::new(60, 5));
        let event = viewport.release(Point::new(60, 5), Mode::Select);
        assert_eq!(event, Some(Event::Empty));
        assert!(viewport.selection().is_empty());

        // In the gap between lanes.
        let event = viewport.release(Point::new(30, 14), Mode::Select);
        assert_eq!(event, Some(Event::Empty));

        assert_eq!(
            *events.borrow(),
            vec![Event::Object(FeatureId(0)), Event::Empty, Event::Empty]
        );
    }

    #[test]
    fn test_drag_selection() {
        let mut viewport = example();
        let events = recorder(&mut viewport);

        viewport.press(Point::new(55, 20));
        viewport.drag_to(Point::new(40, 22));
        assert_eq!(viewport.pending_drag(), Some(Rect::new(40, 20, 16, 3)));

        let event = viewport.release(Point::new(25, 20), Mode::Select);
        let expected = Event::ObjectWithRange {
            feature: FeatureId(2),
            from: 50,
            to: 111,
        };

        assert_eq!(event, Some(expected.clone()));
        assert_eq!(viewport.pending_drag(), None);
        assert_eq!(viewport.selected_rects(), vec![Rect::new(25, 16, 32, 12)]);

        // Past the end of every glyph in lane 1.
        viewport.press(Point::new(200, 20));
        let event = viewport.release(Point::new(260, 20), Mode::Select);
        assert_eq!(event, Some(Event::Empty));

        assert_eq!(*events.borrow(), vec![expected, Event::Empty]);
    }

    #[test]
    fn test_multi_segment_selection() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut viewport = Viewport::try_new(1000, 500, options(), Organizer::default())?;
        viewport.set_features(vec![Feature::try_spliced(
            "mRNA",
            Strand::Minus,
            vec![Span::try_new(0, 100)?, Span::try_new(400, 500)?],
            "tx",
        )?]);

        // Inside the intron.
        assert_eq!(viewport.feature_at(Point::new(100, 3)), None);

        let event = viewport.release(Point::new(210, 3), Mode::Select);
        assert_eq!(event, Some(Event::Object(FeatureId(0))));
        assert_eq!(
            viewport.selected_rects(),
            vec![Rect::new(0, 0, 51, 12), Rect::new(200, 0, 51, 12)]
        );

        Ok(())
    }

    #[test]
    fn test_zoom_stability() {
        let mut viewport = example();
        let before = viewport.transform().scale();

        for anchor in [40, 137, 250, 333, 460] {
            let offset = anchor - viewport.window_x();
            let position = viewport.hit_test(anchor);

            assert!(viewport.zoom(4.0, anchor));
            let zoomed_anchor = viewport.window_x() + offset;
            assert!(viewport.hit_test(zoomed_anchor).abs_diff(position) <= 1);

            assert!(viewport.zoom(0.25, zoomed_anchor));
            let restored_anchor = viewport.window_x() + offset;
            assert!(viewport.hit_test(restored_anchor).abs_diff(position) <= 1);

            assert_eq!(viewport.transform().scale(), before);
            assert_eq!(viewport.window_x(), 0);
        }
    }

    #[test]
    fn test_zoom_stability_when_scrolled() {
        let mut viewport = example();
        viewport.zoom(4.0, 0);
        viewport.pan_to(700);

        let scale = viewport.transform().scale();
        let offset = 137;
        let anchor = viewport.window_x() + offset;
        let position = viewport.hit_test(anchor);
        assert_eq!(position, 418);

        assert!(viewport.zoom(3.0, anchor));
        assert_eq!(viewport.content_width(), 6000);
        let zoomed_anchor = viewport.window_x() + offset;
        assert_eq!(viewport.hit_test(zoomed_anchor), position);

        assert!(viewport.zoom(1.0 / 3.0, zoomed_anchor));
        assert_eq!(viewport.transform().scale(), scale);
        assert_eq!(viewport.window_x(), 700);
        assert_eq!(viewport.hit_test(viewport.window_x() + offset), position);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = example();

        assert!(!viewport.zoom_out(250));
        assert_eq!(viewport.content_width(), 500);

        assert!(viewport.zoom(1_000.0, 250));
        assert_eq!(viewport.content_width(), 16_000);
        assert_eq!(viewport.transform().scale(), 16.0);

        viewport.press(Point::new(10, 10));
        assert!(!viewport.zoom_in(250));
        assert_eq!(viewport.pending_drag(), None);

        assert!(!viewport.zoom(f64::NAN, 250));
        assert!(!viewport.zoom(-2.0, 250));
    }

    #[test]
    fn test_zoom_modes() {
        let mut viewport = example();

        assert_eq!(viewport.release(Point::new(100, 5), Mode::ZoomIn), None);
        assert_eq!(viewport.content_width(), 1000);
        assert_eq!(viewport.window_x(), 100);

        assert_eq!(viewport.release(Point::new(300, 5), Mode::ZoomOut), None);
        assert_eq!(viewport.content_width(), 500);
        assert_eq!(viewport.window_x(), 0);

        // Drag over pixels 100 to 224 (positions 200 to 449) to fill the window.
        viewport.press(Point::new(100, 5));
        viewport.release(Point::new(224, 5), Mode::ZoomIn);
        assert_eq!(viewport.content_width(), 2000);
        assert_eq!(viewport.window_x(), 400);

        let span = viewport.visible_span();
        assert_eq!((span.start(), span.end()), (200, 449));
    }

    #[test]
    fn test_zoom_relayouts() {
        let mut viewport = Viewport::try_new(1000, 100, options(), Organizer::default()).unwrap();
        viewport.set_features(vec![feature("gene", 0, 100, "a"), feature("gene", 103, 150, "b")]);

        // Both end and start land on pixel 10 at a scale of 0.1.
        assert_eq!(viewport.layout().lanes().len(), 2);

        viewport.zoom(4.0, 0);
        assert_eq!(viewport.layout().lanes().len(), 1);
    }

    #[test]
    fn test_pan_and_resize() {
        let mut viewport = example();
        viewport.zoom(4.0, 0);
        assert_eq!(viewport.content_width(), 2000);

        viewport.pan_to(10_000);
        assert_eq!(viewport.window_x(), 1500);
        viewport.pan_by(-600);
        assert_eq!(viewport.window_x(), 900);
        viewport.pan_to(-5);
        assert_eq!(viewport.window_x(), 0);

        viewport.pan_to(1500);
        viewport.resize(1000).unwrap();
        assert_eq!(viewport.zoom_factor(), 4.0);
        assert_eq!(viewport.content_width(), 4000);
        assert_eq!(viewport.window_x(), 1500);

        viewport.resize(200).unwrap();
        assert_eq!(viewport.content_width(), 800);
        assert_eq!(viewport.window_x(), 600);

        assert!(viewport.resize(0).is_err());
        assert_eq!(viewport.base_width(), 200);
    }

    #[test]
    fn test_resize_respects_cap() {
        let mut viewport = Viewport::<()>::try_new(100, 500, options(), Organizer::default()).unwrap();

        assert!(viewport.zoom(3.0, 0));
        assert_eq!(viewport.content_width(), 1500);

        viewport.resize(1000).unwrap();
        assert_eq!(viewport.content_width(), 1600);
    }

    #[test]
    fn test_render_clips_to_window() {
        let mut viewport = example();
        viewport.select(FeatureId(1));
        viewport.zoom(4.0, 0);
        viewport.pan_to(250);

        let mut seen = Vec::new();
        viewport.render(|lane| {
            seen.push((
                lane.category.to_string(),
                lane.glyphs
                    .iter()
                    .map(|glyph| (*glyph.payload, glyph.selected))
                    .collect::<Vec<_>>(),
            ))
        });

        // Window 250..=749 shows `b` (300..=600) and `c` (100..=400) only.
        assert_eq!(
            seen,
            vec![
                (String::from("gene"), vec![("b", true)]),
                (String::from("gene"), vec![("c", false)]),
            ]
        );
    }

    #[test]
    fn test_set_features_clears_selection() {
        let mut viewport = example();
        let events = recorder(&mut viewport);

        assert_eq!(viewport.select(FeatureId(2)), Some(Event::Object(FeatureId(2))));
        assert_eq!(viewport.select(FeatureId(9)), None);

        viewport.set_features(vec![feature("gene", 0, 10, "z")]);
        assert!(viewport.selection().is_empty());

        viewport.clear_selection();

        assert_eq!(
            *events.borrow(),
            vec![Event::Object(FeatureId(2)), Event::Empty, Event::Empty]
        );
    }

    #[test]
    fn test_forced_lanes_through_viewport() {
        let organizer = organizer::Builder::default()
            .force_one_lane_per_category(true)
            .build();
        let mut viewport = Viewport::try_new(1000, 500, options(), organizer).unwrap();
        viewport.set_features(vec![
            feature("gene", 0, 100, "a"),
            feature("gene", 150, 300, "b"),
            feature("gene", 50, 200, "c"),
        ]);

        assert_eq!(viewport.layout().lanes().len(), 1);

        // Overlapping glyphs: the earliest placed wins the click.
        let event = viewport.release(Point::new(40, 5), Mode::Select);
        assert_eq!(event, Some(Event::Object(FeatureId(0))));
    }
}
