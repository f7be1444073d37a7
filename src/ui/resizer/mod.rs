// SPDX-License-Identifier: MPL-2.0
//! Interactive square crop editor.
//!
//! The [`Resizer`] owns the decoded source image, a drawing surface of the
//! same natural size, and the current [`SquareRegion`]. Mutations only mark
//! the surface dirty; the host calls [`Resizer::on_animation_frame`] once per
//! display refresh, which repaints at most once and returns the matching
//! [`Event::ConstraintChanged`]. This follows a "state down, messages up"
//! pattern: the resizer never calls back into its collaborators.
//!
//! Region values are applied as given. Keeping the square inside the image
//! is the caller's policy (see [`crate::domain::validate_region`]).
//!
//! After [`Resizer::remove`] every operation returns [`Error::Removed`] and
//! pending frames are dropped.

mod frame;
mod messages;
pub mod overlay;

pub use frame::FrameScheduler;
pub use messages::{Event, PointerEvent};
pub use overlay::{OverlayRenderer, RenderStyle};

use crate::config::{defaults, Config};
use crate::domain::SquareRegion;
use crate::error::{Error, Result};
use crate::media::{self, ExportedImage, ImagePayload, SourceImage};
use crate::ui::host::{Host, NodeId};
use crate::ui::state::DragState;
use tiny_skia::Pixmap;

/// Construction parameters injected into a [`Resizer`].
#[derive(Debug, Clone)]
pub struct ResizerOptions {
    pub renderer: OverlayRenderer,
    /// Initial crop side as a fraction of the shorter image side.
    pub initial_side_ratio: f32,
}

impl Default for ResizerOptions {
    fn default() -> Self {
        Self {
            renderer: OverlayRenderer::default(),
            initial_side_ratio: defaults::DEFAULT_INITIAL_SIDE_RATIO,
        }
    }
}

impl ResizerOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            renderer: OverlayRenderer::new(RenderStyle::from_config(config)),
            initial_side_ratio: config.initial_side_ratio(),
        }
    }
}

/// Drawing surface plus the node id it occupies in a host.
struct Surface {
    id: NodeId,
    pixmap: Pixmap,
}

/// Square crop editor bound to one source image.
pub struct Resizer {
    image: SourceImage,
    /// Premultiplied copy of `image` used for drawing.
    image_pixmap: Pixmap,
    /// `None` once removed.
    surface: Option<Surface>,
    host: Option<Host>,
    constraint: SquareRegion,
    drag: DragState,
    frames: FrameScheduler,
    renderer: OverlayRenderer,
}

impl std::fmt::Debug for Resizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resizer")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("constraint", &self.constraint)
            .field("attached", &self.host.is_some())
            .field("dragging", &self.drag.is_dragging())
            .field("removed", &self.surface.is_none())
            .finish()
    }
}

impl Resizer {
    /// Creates a resizer for an already decoded image.
    ///
    /// The crop square starts centered with a side of `initial_side_ratio`
    /// times the shorter image side, and the first frame is scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the surface cannot be allocated.
    pub fn new(image: SourceImage, options: ResizerOptions) -> Result<Self> {
        let image_pixmap = image.to_pixmap()?;
        let pixmap = Pixmap::new(image.width(), image.height())
            .ok_or_else(|| Error::Decode("failed to allocate drawing surface".into()))?;
        let constraint =
            SquareRegion::centered(image.width(), image.height(), options.initial_side_ratio);

        let mut resizer = Self {
            image,
            image_pixmap,
            surface: Some(Surface {
                id: NodeId::next(),
                pixmap,
            }),
            host: None,
            constraint,
            drag: DragState::default(),
            frames: FrameScheduler::default(),
            renderer: options.renderer,
        };
        resizer.frames.request();
        log::debug!(
            "Resizer created for {}x{} image, initial region {:?}",
            resizer.image.width(),
            resizer.image.height(),
            resizer.constraint
        );
        Ok(resizer)
    }

    /// Decodes `payload` off the UI thread and builds a resizer around it.
    ///
    /// # Errors
    ///
    /// Propagates decode failures from [`media::decode_payload_async`].
    pub async fn load(payload: ImagePayload, options: ResizerOptions) -> Result<Self> {
        let image = media::decode_payload_async(payload).await?;
        Self::new(image, options)
    }

    fn ensure_live(&self) -> Result<&Surface> {
        self.surface.as_ref().ok_or(Error::Removed)
    }

    /// Inserts the drawing surface as the first child of `host`.
    ///
    /// Attaching to the host it already lives in is a no-op. Attaching to a
    /// different host moves the surface there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove).
    pub fn attach_to(&mut self, host: &Host) -> Result<()> {
        let surface_id = self.ensure_live()?.id;
        if let Some(current) = &self.host {
            if current.same_as(host) {
                return Ok(());
            }
            current.remove_child(surface_id);
        }
        host.insert_first(surface_id);
        self.host = Some(host.clone());
        log::debug!("Resizer surface attached to host {:?}", host.id());
        Ok(())
    }

    /// Current crop region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove).
    pub fn get_constraint(&self) -> Result<SquareRegion> {
        self.ensure_live()?;
        Ok(self.constraint)
    }

    /// Replaces the provided fields of the crop region and schedules a redraw.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove).
    pub fn set_constraint(&mut self, x: Option<f32>, y: Option<f32>, side: Option<f32>) -> Result<()> {
        self.ensure_live()?;
        self.constraint = self.constraint.with(x, y, side);
        self.frames.request();
        log::debug!("Crop region set to {:?}", self.constraint);
        Ok(())
    }

    /// Shifts the crop region by the given deltas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove).
    pub fn move_constraint(&mut self, delta_x: f32, delta_y: f32, delta_side: f32) -> Result<()> {
        self.ensure_live()?;
        let moved = self.constraint.translated(delta_x, delta_y, delta_side);
        self.set_constraint(Some(moved.x), Some(moved.y), Some(moved.side))
    }

    /// Frame boundary: repaints if anything changed since the last frame.
    ///
    /// Returns the change notification for the frame that was drawn, or
    /// `None` when nothing was pending or the resizer has been removed.
    pub fn on_animation_frame(&mut self) -> Option<Event> {
        let Some(surface) = self.surface.as_mut() else {
            self.frames.cancel();
            return None;
        };
        if !self.frames.take() {
            return None;
        }
        self.renderer
            .render(&mut surface.pixmap, &self.image_pixmap, self.constraint);
        Some(Event::ConstraintChanged(self.constraint))
    }

    /// Feeds pointer input to the drag controller.
    ///
    /// A press only starts a drag when it hits the attached surface. While
    /// dragging, moves anywhere in the document shift the region and a
    /// release anywhere ends the drag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove).
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<()> {
        let surface_id = self.ensure_live()?.id;
        match event {
            PointerEvent::Pressed { target, position } => {
                if self.host.is_some() && target == surface_id && !self.drag.is_dragging() {
                    self.drag.start(position);
                    log::debug!("Drag started at {position:?}");
                }
            }
            PointerEvent::Moved { position } => {
                if let Some(delta) = self.drag.step(position) {
                    self.move_constraint(delta.x, delta.y, 0.0)?;
                }
            }
            PointerEvent::Released => {
                if self.drag.is_dragging() {
                    self.drag.stop();
                    log::debug!("Drag ended at region {:?}", self.constraint);
                }
            }
        }
        Ok(())
    }

    /// Encodes the current crop square at 1:1 scale as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove), or
    /// [`Error::Encode`] if the side is under one pixel.
    pub fn export_image(&self) -> Result<ExportedImage> {
        self.ensure_live()?;
        media::export_square(&self.image_pixmap, self.constraint)
    }

    /// Detaches the surface from its host, ends any drag, drops pending
    /// frames and releases the surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] if called twice.
    pub fn remove(&mut self) -> Result<()> {
        let surface = self.surface.take().ok_or(Error::Removed)?;
        if let Some(host) = self.host.take() {
            host.remove_child(surface.id);
        }
        self.drag.stop();
        self.frames.cancel();
        log::debug!("Resizer removed");
        Ok(())
    }

    /// Source image being cropped.
    #[must_use]
    pub fn image(&self) -> &SourceImage {
        &self.image
    }

    /// Id of the surface node, used as pointer press target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Removed`] after [`remove`](Self::remove).
    pub fn surface_id(&self) -> Result<NodeId> {
        Ok(self.ensure_live()?.id)
    }

    /// Last rendered frame, `None` after removal.
    #[must_use]
    pub fn surface(&self) -> Option<&Pixmap> {
        self.surface.as_ref().map(|surface| &surface.pixmap)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.surface.is_none()
    }

    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.frames.is_pending()
    }

    /// Number of frames actually repainted so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames.frames_rendered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use approx::assert_abs_diff_eq;

    fn solid_image(width: u32, height: u32) -> SourceImage {
        let rgba = [90u8, 120, 200, 255].repeat(width as usize * height as usize);
        SourceImage::from_rgba(width, height, rgba).expect("valid rgba")
    }

    fn resizer(width: u32, height: u32) -> Resizer {
        Resizer::new(solid_image(width, height), ResizerOptions::default()).expect("resizer")
    }

    fn attached(width: u32, height: u32) -> (Resizer, Host) {
        let mut resizer = resizer(width, height);
        let host = Host::new();
        resizer.attach_to(&host).expect("attach");
        (resizer, host)
    }

    fn press(resizer: &Resizer, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Pressed {
            target: resizer.surface_id().expect("live"),
            position: Coordinate::new(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Moved {
            position: Coordinate::new(x, y),
        }
    }

    #[test]
    fn default_region_is_centered_three_quarters_of_short_side() {
        let resizer = resizer(800, 600);
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(175.0, 75.0, 450.0)
        );
    }

    #[test]
    fn default_region_for_non_square_source() {
        let resizer = resizer(1000, 500);
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(312.5, 62.5, 375.0)
        );
    }

    #[test]
    fn first_frame_is_scheduled_on_creation() {
        let mut resizer = resizer(40, 20);
        assert!(resizer.has_pending_frame());
        let event = resizer.on_animation_frame();
        assert_eq!(
            event,
            Some(Event::ConstraintChanged(SquareRegion::new(12.5, 2.5, 15.0)))
        );
        assert_eq!(resizer.on_animation_frame(), None);
    }

    #[test]
    fn set_constraint_keeps_omitted_fields() {
        let mut resizer = resizer(800, 600);
        resizer.set_constraint(Some(10.0), None, None).expect("live");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(10.0, 75.0, 450.0)
        );
        resizer.set_constraint(None, None, Some(100.0)).expect("live");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(10.0, 75.0, 100.0)
        );
    }

    #[test]
    fn set_constraint_does_not_clamp() {
        let mut resizer = resizer(100, 100);
        resizer
            .set_constraint(Some(-50.0), Some(90.0), Some(400.0))
            .expect("live");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(-50.0, 90.0, 400.0)
        );
    }

    #[test]
    fn mutations_within_one_frame_coalesce() {
        let mut resizer = resizer(800, 600);
        let _ = resizer.on_animation_frame();
        let before = resizer.frames_rendered();

        resizer.set_constraint(Some(1.0), Some(2.0), Some(3.0)).expect("live");
        resizer.set_constraint(Some(4.0), None, None).expect("live");
        resizer.set_constraint(Some(7.0), Some(8.0), Some(9.0)).expect("live");

        let event = resizer.on_animation_frame();
        assert_eq!(
            event,
            Some(Event::ConstraintChanged(SquareRegion::new(7.0, 8.0, 9.0)))
        );
        assert_eq!(resizer.on_animation_frame(), None);
        assert_eq!(resizer.frames_rendered(), before + 1);
    }

    #[test]
    fn move_constraint_round_trip_restores_region() {
        let mut resizer = resizer(800, 600);
        let original = resizer.get_constraint().expect("live");
        resizer.move_constraint(12.25, -7.5, 0.0).expect("live");
        resizer.move_constraint(-12.25, 7.5, 0.0).expect("live");
        let restored = resizer.get_constraint().expect("live");
        assert_abs_diff_eq!(restored.x, original.x, epsilon = 1e-4);
        assert_abs_diff_eq!(restored.y, original.y, epsilon = 1e-4);
        assert_abs_diff_eq!(restored.side, original.side, epsilon = 1e-4);
    }

    #[test]
    fn move_constraint_can_grow_side() {
        let mut resizer = resizer(800, 600);
        resizer.move_constraint(0.0, 0.0, -50.0).expect("live");
        assert_eq!(resizer.get_constraint().expect("live").side, 400.0);
    }

    #[test]
    fn drag_step_moves_region_by_reference_minus_current() {
        let (mut resizer, _host) = attached(800, 600);
        resizer.handle_pointer(press(&resizer, 100.0, 100.0)).expect("live");
        assert!(resizer.is_dragging());

        resizer.handle_pointer(moved(80.0, 90.0)).expect("live");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(195.0, 85.0, 450.0)
        );
    }

    #[test]
    fn drag_accumulates_steps_and_stops_on_release() {
        let (mut resizer, _host) = attached(800, 600);
        resizer.handle_pointer(press(&resizer, 0.0, 0.0)).expect("live");
        resizer.handle_pointer(moved(-5.0, 0.0)).expect("live");
        resizer.handle_pointer(moved(-5.0, -5.0)).expect("live");
        resizer.handle_pointer(PointerEvent::Released).expect("live");
        assert!(!resizer.is_dragging());

        // Moves after release are ignored
        resizer.handle_pointer(moved(-100.0, -100.0)).expect("live");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(180.0, 80.0, 450.0)
        );
    }

    #[test]
    fn press_outside_surface_does_not_start_drag() {
        let (mut resizer, _host) = attached(800, 600);
        resizer
            .handle_pointer(PointerEvent::Pressed {
                target: NodeId::next(),
                position: Coordinate::new(1.0, 1.0),
            })
            .expect("live");
        assert!(!resizer.is_dragging());
    }

    #[test]
    fn press_before_attach_does_not_start_drag() {
        let mut resizer = resizer(800, 600);
        resizer.handle_pointer(press(&resizer, 1.0, 1.0)).expect("live");
        assert!(!resizer.is_dragging());
    }

    #[test]
    fn second_press_does_not_restart_active_drag() {
        let (mut resizer, _host) = attached(800, 600);
        resizer.handle_pointer(press(&resizer, 10.0, 10.0)).expect("live");
        resizer.handle_pointer(press(&resizer, 50.0, 50.0)).expect("live");
        resizer.handle_pointer(moved(0.0, 0.0)).expect("live");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(185.0, 85.0, 450.0)
        );
    }

    #[test]
    fn attach_inserts_surface_first_and_is_idempotent() {
        let mut resizer = resizer(10, 10);
        let host = Host::new();
        let sibling = NodeId::next();
        host.append(sibling);

        resizer.attach_to(&host).expect("attach");
        resizer.attach_to(&host.clone()).expect("attach again");

        let surface = resizer.surface_id().expect("live");
        assert_eq!(host.children(), vec![surface, sibling]);
    }

    #[test]
    fn attach_to_other_host_moves_surface() {
        let (mut resizer, first) = attached(10, 10);
        let second = Host::new();
        resizer.attach_to(&second).expect("attach");
        let surface = resizer.surface_id().expect("live");
        assert!(!first.contains(surface));
        assert!(second.contains(surface));
    }

    #[test]
    fn export_has_side_by_side_dimensions() {
        let mut resizer = resizer(800, 600);
        let exported = resizer.export_image().expect("export");
        assert_eq!((exported.width, exported.height), (450, 450));

        resizer.set_constraint(Some(0.0), Some(0.0), Some(123.0)).expect("live");
        let exported = resizer.export_image().expect("export");
        assert_eq!((exported.width, exported.height), (123, 123));
    }

    #[test]
    fn export_does_not_touch_live_state() {
        let mut resizer = resizer(64, 64);
        let _ = resizer.on_animation_frame();
        let frame = resizer.surface().expect("surface").data().to_vec();
        let region = resizer.get_constraint().expect("live");

        let _ = resizer.export_image().expect("export");

        assert_eq!(resizer.get_constraint().expect("live"), region);
        assert!(!resizer.has_pending_frame());
        assert_eq!(resizer.surface().expect("surface").data(), frame.as_slice());
    }

    #[test]
    fn remove_detaches_and_rejects_further_use() {
        let (mut resizer, host) = attached(50, 50);
        let surface = resizer.surface_id().expect("live");
        resizer.handle_pointer(press(&resizer, 1.0, 1.0)).expect("live");

        resizer.remove().expect("remove");

        assert!(!host.contains(surface));
        assert!(resizer.is_removed());
        assert!(!resizer.is_dragging());
        assert!(resizer.surface().is_none());
        assert_eq!(resizer.get_constraint(), Err(Error::Removed));
        assert_eq!(resizer.set_constraint(Some(1.0), None, None), Err(Error::Removed));
        assert_eq!(resizer.move_constraint(1.0, 1.0, 0.0), Err(Error::Removed));
        assert_eq!(resizer.attach_to(&host), Err(Error::Removed));
        assert_eq!(resizer.handle_pointer(moved(0.0, 0.0)), Err(Error::Removed));
        assert!(matches!(resizer.export_image(), Err(Error::Removed)));
        assert_eq!(resizer.remove(), Err(Error::Removed));
    }

    #[test]
    fn pending_frame_is_dropped_after_remove() {
        let mut resizer = resizer(50, 50);
        resizer.set_constraint(Some(3.0), None, None).expect("live");
        assert!(resizer.has_pending_frame());

        resizer.remove().expect("remove");
        assert_eq!(resizer.on_animation_frame(), None);
        assert_eq!(resizer.frames_rendered(), 0);
    }

    #[test]
    fn remove_without_attach_succeeds() {
        let mut resizer = resizer(10, 10);
        assert_eq!(resizer.remove(), Ok(()));
    }

    #[tokio::test]
    async fn load_decodes_payload_first() {
        let png = {
            let image = image_rs::RgbaImage::from_pixel(8, 4, image_rs::Rgba([1, 2, 3, 255]));
            let mut out = std::io::Cursor::new(Vec::new());
            image
                .write_to(&mut out, image_rs::ImageFormat::Png)
                .expect("encode");
            out.into_inner()
        };
        let resizer = Resizer::load(ImagePayload::Bytes(png), ResizerOptions::default())
            .await
            .expect("load");
        assert_eq!(
            resizer.get_constraint().expect("live"),
            SquareRegion::new(2.5, 0.5, 3.0)
        );
    }

    #[tokio::test]
    async fn load_reports_decode_failure() {
        let result =
            Resizer::load(ImagePayload::Bytes(b"nope".to_vec()), ResizerOptions::default()).await;
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
