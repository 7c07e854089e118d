//! Mount/frame/resize/unmount lifecycle for a particle field.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use drift_core::{Bounds, Palette};
use rand::Rng;

use crate::field::ParticleField;
use crate::surface::Surface;

/// Flag shared between a mount and the frame requests it hands out.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether both tokens refer to the same flag.
    pub fn same_as(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// A scheduled frame, handed back to the host to run later.
#[derive(Debug, Clone)]
pub struct FrameRequest {
    token: CancellationToken,
    frame: u64,
}

impl FrameRequest {
    /// Sequence number of the frame this request will run.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// False once the issuing mount has been torn down.
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }
}

/// Drives a [`ParticleField`] for as long as its host view is mounted.
#[derive(Debug)]
pub struct Animator {
    /// None when mounting found no surface or container.
    field: Option<ParticleField>,
    token: CancellationToken,
    /// Frames run so far.
    frames: u64,
}

impl Animator {
    /// Mount onto a surface sized to `container`.
    ///
    /// Without a surface or a container the animator is inert: it never
    /// requests frames and ignores resizes.
    pub fn mount<S, R>(
        surface: Option<&mut S>,
        container: Option<Bounds>,
        palette: Palette,
        rng: &mut R,
    ) -> Self
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let field = match (surface, container) {
            (Some(surface), Some(bounds)) => {
                surface.set_size(bounds);
                log::debug!(
                    "mounting particle field {}x{} ({})",
                    bounds.width,
                    bounds.height,
                    palette.name()
                );
                Some(ParticleField::new(bounds, palette, rng))
            }
            (None, _) => {
                log::debug!("no drawing surface, particle field disabled");
                None
            }
            (_, None) => {
                log::debug!("no container bounds, particle field disabled");
                None
            }
        };

        Self {
            field,
            token: CancellationToken::new(),
            frames: 0,
        }
    }

    /// The field, unless the animator is inert or unmounted.
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref().filter(|_| self.is_active())
    }

    /// Whether frames and resizes still have any effect.
    pub fn is_active(&self) -> bool {
        self.field.is_some() && !self.token.is_cancelled()
    }

    /// Whether [`Animator::unmount`] has run.
    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Request the first frame after mounting.
    pub fn first_frame(&self) -> Option<FrameRequest> {
        self.next_request()
    }

    fn next_request(&self) -> Option<FrameRequest> {
        self.is_active().then(|| FrameRequest {
            token: self.token.clone(),
            frame: self.frames,
        })
    }

    fn accepts(&self, request: &FrameRequest) -> bool {
        request.token.same_as(&self.token) && self.is_active()
    }

    /// Run one frame and request the next.
    ///
    /// A request issued by another mount, or by this one before it was
    /// unmounted, draws nothing and returns `None`. A missing surface skips
    /// the frame but still requests the next one.
    pub fn run_frame<S>(
        &mut self,
        request: FrameRequest,
        surface: Option<&mut S>,
    ) -> Option<FrameRequest>
    where
        S: Surface + ?Sized,
    {
        if !self.accepts(&request) {
            log::trace!("dropping stale frame request {}", request.frame);
            return None;
        }

        match (surface, self.field.as_mut()) {
            (Some(surface), Some(field)) => {
                surface.clear();
                field.step();
                field.draw(surface);
                self.frames += 1;
            }
            _ => log::trace!("surface unavailable, skipping frame {}", request.frame),
        }

        self.next_request()
    }

    /// Match the surface and field to the container's current size.
    pub fn resize<S>(&mut self, surface: Option<&mut S>, container: Option<Bounds>)
    where
        S: Surface + ?Sized,
    {
        if !self.is_active() {
            return;
        }
        let Some(bounds) = container else {
            log::debug!("resize without container bounds ignored");
            return;
        };

        if let Some(surface) = surface {
            surface.set_size(bounds);
        }
        if let Some(field) = self.field.as_mut() {
            if field.bounds() != bounds {
                log::debug!("particle field resized to {}x{}", bounds.width, bounds.height);
            }
            field.resize(bounds);
        }
    }

    /// Tear down. Pending frame requests become no-ops.
    pub fn unmount(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        log::debug!("particle field unmounted after {} frames", self.frames);
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::field::PARTICLE_COUNT;
    use crate::surface::{DrawCommand, DrawList};

    fn mounted(list: &mut DrawList, bounds: Bounds) -> Animator {
        let mut rng = StdRng::seed_from_u64(5);
        Animator::mount(Some(list), Some(bounds), Palette::Indigo, &mut rng)
    }

    #[test]
    fn test_mount_sizes_surface() {
        let mut list = DrawList::new();
        let animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        assert!(animator.is_active());
        assert_eq!(list.size(), Bounds::new(640.0, 384.0));
        assert_eq!(animator.field().map(|f| f.len()), Some(PARTICLE_COUNT));
        // Mounting draws nothing until the first frame runs.
        assert_eq!(list.draw_calls(), 0);
    }

    #[test]
    fn test_mount_without_surface_is_inert() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut animator = Animator::mount(
            None::<&mut DrawList>,
            Some(Bounds::new(100.0, 100.0)),
            Palette::Indigo,
            &mut rng,
        );
        assert!(!animator.is_active());
        assert!(animator.field().is_none());
        assert!(animator.first_frame().is_none());

        let mut list = DrawList::new();
        animator.resize(Some(&mut list), Some(Bounds::new(50.0, 50.0)));
        assert_eq!(list.size(), Bounds::default());
    }

    #[test]
    fn test_mount_without_container_is_inert() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut list = DrawList::new();
        let animator = Animator::mount(Some(&mut list), None, Palette::Indigo, &mut rng);
        assert!(!animator.is_active());
        assert!(animator.first_frame().is_none());
    }

    #[test]
    fn test_frame_draw_order() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        let request = animator.first_frame().expect("active animator requests a frame");
        let next = animator.run_frame(request, Some(&mut list));

        assert_eq!(next.map(|r| r.frame()), Some(1));
        assert_eq!(list.circles(), PARTICLE_COUNT);
        let commands = list.commands();
        assert!(
            commands[..PARTICLE_COUNT]
                .iter()
                .all(|c| matches!(c, DrawCommand::Circle { .. }))
        );
        assert!(
            commands[PARTICLE_COUNT..]
                .iter()
                .all(|c| matches!(c, DrawCommand::Line { .. }))
        );
        // clear + circles + lines
        assert_eq!(list.draw_calls(), 1 + commands.len() as u64);
    }

    #[test]
    fn test_every_frame_renders_all_particles() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(300.0, 200.0));
        let mut request = animator.first_frame();
        for _ in 0..500 {
            request = animator.run_frame(request.expect("frame requested"), Some(&mut list));
            assert_eq!(list.circles(), PARTICLE_COUNT);
        }
        assert_eq!(animator.frames(), 500);
    }

    #[test]
    fn test_missing_surface_skips_frame() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        let before = animator.field().map(|f| f.particles().to_vec());

        let request = animator.first_frame().expect("frame requested");
        let next = animator.run_frame(request, None::<&mut DrawList>);

        assert!(next.is_some());
        assert_eq!(animator.frames(), 0);
        assert_eq!(animator.field().map(|f| f.particles().to_vec()), before);
        assert_eq!(list.draw_calls(), 0);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        let positions = animator.field().map(|f| f.particles().to_vec());
        let target = Bounds::new(800.0, 480.0);

        animator.resize(Some(&mut list), Some(target));
        let once = (list.size(), animator.field().map(|f| f.bounds()));
        animator.resize(Some(&mut list), Some(target));
        let twice = (list.size(), animator.field().map(|f| f.bounds()));

        assert_eq!(once, (target, Some(target)));
        assert_eq!(once, twice);
        assert_eq!(animator.field().map(|f| f.particles().to_vec()), positions);
        assert_eq!(animator.field().map(|f| f.len()), Some(PARTICLE_COUNT));
    }

    #[test]
    fn test_resize_without_container_is_noop() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        animator.resize(Some(&mut list), None);
        assert_eq!(list.size(), Bounds::new(640.0, 384.0));
        assert_eq!(
            animator.field().map(|f| f.bounds()),
            Some(Bounds::new(640.0, 384.0))
        );
    }

    #[test]
    fn test_pending_frame_after_unmount_draws_nothing() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        let request = animator.first_frame().expect("frame requested");
        let pending = animator
            .run_frame(request, Some(&mut list))
            .expect("next frame requested");
        let calls = list.draw_calls();

        animator.unmount();
        assert!(!pending.is_live());
        assert!(animator.run_frame(pending, Some(&mut list)).is_none());
        assert_eq!(list.draw_calls(), calls);
        assert!(animator.first_frame().is_none());
    }

    #[test]
    fn test_inert_mount_is_not_unmounted() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut list = DrawList::new();
        let mut animator = Animator::mount(Some(&mut list), None, Palette::Indigo, &mut rng);
        assert!(!animator.is_active());
        assert!(!animator.is_unmounted());

        animator.unmount();
        assert!(animator.is_unmounted());
    }

    #[test]
    fn test_resize_after_unmount_is_ignored() {
        let mut list = DrawList::new();
        let mut animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        animator.unmount();
        animator.unmount();
        animator.resize(Some(&mut list), Some(Bounds::new(10.0, 10.0)));
        assert_eq!(list.size(), Bounds::new(640.0, 384.0));
    }

    #[test]
    fn test_request_from_previous_mount_is_rejected() {
        let mut list = DrawList::new();
        let mut old = mounted(&mut list, Bounds::new(640.0, 384.0));
        let stale = old.first_frame().expect("frame requested");
        old.unmount();

        let mut fresh = mounted(&mut list, Bounds::new(640.0, 384.0));
        let calls = list.draw_calls();
        assert!(fresh.run_frame(stale, Some(&mut list)).is_none());
        assert_eq!(list.draw_calls(), calls);
        assert_eq!(fresh.frames(), 0);
    }

    #[test]
    fn test_drop_cancels_outstanding_requests() {
        let mut list = DrawList::new();
        let animator = mounted(&mut list, Bounds::new(640.0, 384.0));
        let request = animator.first_frame().expect("frame requested");
        drop(animator);
        assert!(!request.is_live());
    }
}
