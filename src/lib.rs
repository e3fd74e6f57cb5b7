//! `featuremap` is a crate for laying out annotated sequence features into
//! tracks and mapping them onto pixels.
//!
//! The crate provides two main points of entry:
//!
//! - Organizing features into non-overlapping lanes, grouped by category.
//! - Providing a viewport that zooms, scrolls, hit-tests and selects over such
//!   a layout.
//!
//! ## Organizing features
//!
//! A [`Feature`](crate::feature::Feature) is a range of positions on a single
//! linear sequence, possibly split into several segments, that carries a
//! category key, a [`Strand`](crate::feature::Strand) and a payload of your
//! choosing. Given a [`Transform`](crate::transform::Transform) that maps
//! sequence positions onto pixel columns, a
//! [`layout::Organizer`] assigns every feature to a category and then packs
//! each category's features into as few lanes as possible such that no two
//! glyphs within a lane share a pixel column.
//!
//! Lane packing happens in pixel space rather than sequence space: two
//! features that are far apart on the sequence may still collide once the
//! sequence is squeezed into a narrow window. As such, a layout is only valid
//! for the transform it was computed with.
//!
//! ```
//! use featuremap::feature::Feature;
//! use featuremap::feature::Span;
//! use featuremap::feature::Strand;
//! use featuremap::layout::Organizer;
//! use featuremap::transform::Transform;
//!
//! let features = vec![
//!     Feature::new("gene", Strand::Plus, Span::try_new(0, 100)?, "a"),
//!     Feature::new("gene", Strand::Plus, Span::try_new(150, 300)?, "b"),
//!     Feature::new("gene", Strand::Minus, Span::try_new(50, 200)?, "c"),
//! ];
//!
//! let transform = Transform::try_new(1000, 500, 0, 0, 1.0)?;
//! let layout = Organizer::default().organize(&features, &transform);
//!
//! for (i, lane) in layout.lanes().iter().enumerate() {
//!     let names = lane
//!         .resolve(&features)
//!         .map(|(_, feature)| *feature.payload())
//!         .collect::<Vec<_>>();
//!
//!     println!("{i} ({}): {}", lane.category(), names.join(", "));
//! }
//!
//! assert_eq!(layout.lanes().len(), 2);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Viewport
//!
//! Most often, users won't want to manage transforms and layouts by hand. To
//! that end, this crate provides the [`viewport::Viewport`] facility. A
//! viewport owns the features on display and keeps their layout in step with
//! every zoom and resize. It also turns pointer gestures into
//! [`selection::Event`]s and hands them to any listeners registered through
//! [`viewport::Viewport::subscribe()`].
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
//! let mut viewport = Viewport::try_new(1000, 520, Options::default(), Organizer::default())?;
//! viewport.set_features(vec![Feature::new(
//!     "gene",
//!     Strand::Plus,
//!     Span::try_new(100, 200)?,
//!     "a",
//! )]);
//!
//! viewport.subscribe(|event| println!("selected: {event:?}"));
//!
//! let event = viewport.release(Point::new(80, 5), Mode::Select);
//! assert!(matches!(event, Some(Event::Object(_))));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod category;
pub mod feature;
pub mod layout;
pub mod selection;
pub mod transform;
pub mod viewport;

pub use feature::Feature;
pub use layout::Layout;
pub use transform::Transform;
pub use viewport::Viewport;
