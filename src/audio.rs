/// Background music collaborator. Started once per session, never stopped.
pub trait Soundtrack {
    fn start_loop(&mut self);
}

/// Terminal builds have no audio backend; the call is only logged.
#[derive(Debug, Default)]
pub struct SilentSoundtrack {
    started: bool,
}

impl SilentSoundtrack {
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl Soundtrack for SilentSoundtrack {
    fn start_loop(&mut self) {
        if !self.started {
            self.started = true;
            tracing::info!("no audio backend, background track skipped");
        }
    }
}
