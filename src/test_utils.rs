#[cfg(test)]
pub mod test_helpers {
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    use crate::attributes::{Animation, EntryAttributes, Priority};
    use crate::clock::ManualClock;
    use crate::config::Config;
    use crate::engine::Engine;
    use crate::error::MountError;
    use crate::overlay::{HeadlessHost, SurfaceHandle, SurfaceId};
    use crate::presentation::AnimationTicket;
    use crate::renderable::{Renderable, RenderableRef, Size};
    use crate::request::{EntryId, EntryRequest};

    #[derive(Debug, Clone, PartialEq)]
    pub enum ViewCall {
        Mount(SurfaceId),
        AnimateIn(AnimationTicket),
        AnimateOut(AnimationTicket),
        Unmount,
    }

    /// Renderable that records every call the engine makes on it
    pub struct RecordingView {
        size: Size,
        mount_error: Option<MountError>,
        pass_through: bool,
        calls: Mutex<Vec<ViewCall>>,
    }

    impl RecordingView {
        pub fn new() -> Arc<Self> {
            Self::build(Size::new(320.0, 64.0), None, false)
        }

        pub fn zero_sized() -> Arc<Self> {
            Self::build(Size::new(0.0, 0.0), None, false)
        }

        pub fn failing(error: MountError) -> Arc<Self> {
            Self::build(Size::new(320.0, 64.0), Some(error), false)
        }

        pub fn pass_through() -> Arc<Self> {
            Self::build(Size::new(320.0, 64.0), None, true)
        }

        fn build(size: Size, mount_error: Option<MountError>, pass_through: bool) -> Arc<Self> {
            Arc::new(Self {
                size,
                mount_error,
                pass_through,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> Vec<ViewCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn animate_in_count(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, ViewCall::AnimateIn(_)))
                .count()
        }

        pub fn animate_out_count(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, ViewCall::AnimateOut(_)))
                .count()
        }
    }

    impl Renderable for RecordingView {
        fn preferred_size(&self) -> Size {
            self.size
        }

        fn mount(&self, surface: &SurfaceHandle) -> Result<(), MountError> {
            if let Some(error) = &self.mount_error {
                return Err(error.clone());
            }
            self.calls.lock().unwrap().push(ViewCall::Mount(surface.id()));
            Ok(())
        }

        fn animate_in(&self, _animation: &Animation, ticket: AnimationTicket) {
            self.calls.lock().unwrap().push(ViewCall::AnimateIn(ticket));
        }

        fn animate_out(&self, _animation: &Animation, ticket: AnimationTicket) {
            self.calls.lock().unwrap().push(ViewCall::AnimateOut(ticket));
        }

        fn unmount(&self) {
            self.calls.lock().unwrap().push(ViewCall::Unmount);
        }

        fn passes_touches_through(&self) -> bool {
            self.pass_through
        }
    }

    pub fn view() -> RenderableRef {
        RecordingView::new()
    }

    pub fn attrs(priority: Priority) -> EntryAttributes {
        EntryAttributes::default().with_priority(priority)
    }

    pub fn request(raw_id: u64, attributes: EntryAttributes) -> EntryRequest {
        EntryRequest::new(
            EntryId::new(raw_id),
            view(),
            attributes,
            Instant::now(),
            raw_id,
        )
    }

    pub fn test_engine() -> (Engine<HeadlessHost>, ManualClock) {
        let clock = ManualClock::new();
        let engine = Engine::with_config(HeadlessHost::default(), &Config::default())
            .with_clock(clock.clone());
        (engine, clock)
    }

    /// Report the in-flight animation as finished
    pub fn complete_animation(engine: &mut Engine<HeadlessHost>) -> bool {
        match engine.current_ticket() {
            Some(ticket) => engine.animation_finished(ticket),
            None => false,
        }
    }

    /// Display and run the entrance to completion
    pub fn show(engine: &mut Engine<HeadlessHost>, attributes: EntryAttributes) -> EntryId {
        let outcome = engine.display(view(), attributes).unwrap();
        assert!(complete_animation(engine), "entrance did not start");
        outcome.id()
    }
}
