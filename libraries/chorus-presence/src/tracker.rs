//! Own-channel membership tracking

use chorus_core::{ChannelDirectory, ChannelEvent, ChannelId, MemberId, PlaybackControl, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Membership state of the channel the bot occupies
///
/// `last_empty` remembers the emptiness observed at the previous
/// evaluation so pause/resume fire once per transition, not once per
/// event.
#[derive(Default)]
struct PresenceState {
    own_channel: Option<ChannelId>,
    members: HashSet<MemberId>,
    last_empty: Option<bool>,
}

impl PresenceState {
    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Tracks who shares the bot's voice channel and drives auto-pause
///
/// All mutation goes through one internal mutex, so overlapping events
/// from the backend are applied in a single serialized order.
pub struct PresenceTracker {
    state: Mutex<PresenceState>,
    control: Arc<dyn PlaybackControl>,
    directory: Arc<dyn ChannelDirectory>,
    auto_pause: bool,
}

impl PresenceTracker {
    pub fn new(
        control: Arc<dyn PlaybackControl>,
        directory: Arc<dyn ChannelDirectory>,
        auto_pause: bool,
    ) -> Self {
        Self {
            state: Mutex::new(PresenceState::default()),
            control,
            directory,
            auto_pause,
        }
    }

    /// The channel the bot currently occupies, if any
    pub async fn own_channel(&self) -> Option<ChannelId> {
        self.state.lock().await.own_channel
    }

    /// Number of other members sharing the bot's channel
    pub async fn member_count(&self) -> usize {
        self.state.lock().await.members.len()
    }

    /// Rebuild membership from the directory after (re)joining `channel`
    ///
    /// The authoritative listing replaces any incrementally tracked set,
    /// which recovers from missed events.
    pub async fn resync(&self, channel: ChannelId) -> Result<()> {
        let listing = self.directory.list_members(channel).await?;
        let self_id = self.directory.self_id();

        let mut state = self.state.lock().await;
        state.own_channel = Some(channel);
        state.members = listing.into_iter().filter(|m| *m != self_id).collect();
        tracing::debug!(%channel, members = state.members.len(), "channel membership resynced");
        self.evaluate(&mut state).await
    }

    /// Apply a membership event from the voice backend
    pub async fn handle_event(&self, event: ChannelEvent) -> Result<()> {
        match event {
            ChannelEvent::Entered { member, channel } => self.on_enter(member, channel).await,
            ChannelEvent::Left { member, channel } => self.on_leave(member, channel).await,
            ChannelEvent::Moved { member, from, to } => self.on_move(member, from, to).await,
        }
    }

    /// A member entered `target`; the bot entering triggers a resync
    pub async fn on_enter(&self, member: MemberId, target: ChannelId) -> Result<()> {
        if member == self.directory.self_id() {
            return self.resync(target).await;
        }
        self.member_entered(member, target).await
    }

    /// A member left `source`
    pub async fn on_leave(&self, member: MemberId, source: ChannelId) -> Result<()> {
        if member == self.directory.self_id() {
            return self.left_own_channel().await;
        }
        self.member_left(member, source).await
    }

    /// A member moved channels; the bot moving resyncs the destination
    pub async fn on_move(&self, member: MemberId, source: ChannelId, target: ChannelId) -> Result<()> {
        if member == self.directory.self_id() {
            return self.resync(target).await;
        }
        // A move is a leave from one channel and an entry into another;
        // at most one of the two concerns us.
        self.member_left(member, source).await?;
        self.member_entered(member, target).await
    }

    async fn member_entered(&self, member: MemberId, channel: ChannelId) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.own_channel != Some(channel) {
            return Ok(());
        }
        state.members.insert(member);
        self.evaluate(&mut state).await
    }

    async fn member_left(&self, member: MemberId, channel: ChannelId) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.own_channel != Some(channel) {
            return Ok(());
        }
        state.members.remove(&member);
        self.evaluate(&mut state).await
    }

    async fn left_own_channel(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.own_channel = None;
        state.members.clear();
        state.last_empty = None;
        Ok(())
    }

    /// Issue pause/resume when the emptiness observation changes
    async fn evaluate(&self, state: &mut PresenceState) -> Result<()> {
        let empty = state.is_empty();
        let previous = state.last_empty.replace(empty);

        if !self.auto_pause || previous == Some(empty) {
            return Ok(());
        }
        match (previous, empty) {
            (Some(false), true) => {
                tracing::info!("channel emptied, pausing playback");
                self.control.set_paused(true).await
            }
            (Some(true), false) => {
                tracing::info!("channel repopulated, resuming playback");
                self.control.set_paused(false).await
            }
            // First observation after a (re)join: record only.
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chorus_core::Track;
    use std::sync::Mutex as StdMutex;

    /// Records every pause-state write it receives
    #[derive(Default)]
    struct RecordingControl {
        writes: StdMutex<Vec<bool>>,
    }

    #[async_trait]
    impl PlaybackControl for RecordingControl {
        async fn start(&self, _track: &Track) -> Result<()> {
            Ok(())
        }

        async fn stop(&self) -> Result<()> {
            Ok(())
        }

        async fn set_paused(&self, paused: bool) -> Result<()> {
            self.writes.lock().unwrap().push(paused);
            Ok(())
        }

        async fn is_playing(&self) -> bool {
            true
        }

        async fn is_paused(&self) -> bool {
            self.writes.lock().unwrap().last().copied().unwrap_or(false)
        }
    }

    struct FixedDirectory {
        self_id: MemberId,
        members: Vec<MemberId>,
    }

    #[async_trait]
    impl ChannelDirectory for FixedDirectory {
        fn self_id(&self) -> MemberId {
            self.self_id
        }

        async fn list_members(&self, _channel: ChannelId) -> Result<Vec<MemberId>> {
            Ok(self.members.clone())
        }
    }

    const BOT: MemberId = MemberId(1);
    const ALICE: MemberId = MemberId(2);
    const BOB: MemberId = MemberId(3);
    const HOME: ChannelId = ChannelId(10);
    const OTHER: ChannelId = ChannelId(20);

    fn tracker_with(members: Vec<MemberId>, auto_pause: bool) -> (PresenceTracker, Arc<RecordingControl>) {
        let control = Arc::new(RecordingControl::default());
        let directory = Arc::new(FixedDirectory {
            self_id: BOT,
            members,
        });
        (
            PresenceTracker::new(control.clone(), directory, auto_pause),
            control,
        )
    }

    #[tokio::test]
    async fn resync_excludes_self() {
        let (tracker, _) = tracker_with(vec![BOT, ALICE, BOB], true);
        tracker.resync(HOME).await.unwrap();

        assert_eq!(tracker.member_count().await, 2);
        assert_eq!(tracker.own_channel().await, Some(HOME));
    }

    #[tokio::test]
    async fn last_member_leaving_pauses_once() {
        let (tracker, control) = tracker_with(vec![BOT, ALICE], true);
        tracker.resync(HOME).await.unwrap();

        tracker
            .handle_event(ChannelEvent::Left {
                member: ALICE,
                channel: HOME,
            })
            .await
            .unwrap();

        assert_eq!(*control.writes.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn repeated_empty_observations_pause_only_once() {
        let (tracker, control) = tracker_with(vec![BOT, ALICE], true);
        tracker.resync(HOME).await.unwrap();

        tracker
            .handle_event(ChannelEvent::Left {
                member: ALICE,
                channel: HOME,
            })
            .await
            .unwrap();
        // A stale leave for someone already gone changes nothing.
        tracker
            .handle_event(ChannelEvent::Left {
                member: BOB,
                channel: HOME,
            })
            .await
            .unwrap();

        assert_eq!(*control.writes.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn member_entering_empty_channel_resumes() {
        let (tracker, control) = tracker_with(vec![BOT, ALICE], true);
        tracker.resync(HOME).await.unwrap();

        tracker
            .handle_event(ChannelEvent::Left {
                member: ALICE,
                channel: HOME,
            })
            .await
            .unwrap();
        tracker
            .handle_event(ChannelEvent::Entered {
                member: BOB,
                channel: HOME,
            })
            .await
            .unwrap();

        assert_eq!(*control.writes.lock().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn events_for_other_channels_are_ignored() {
        let (tracker, control) = tracker_with(vec![BOT, ALICE], true);
        tracker.resync(HOME).await.unwrap();

        tracker
            .handle_event(ChannelEvent::Left {
                member: ALICE,
                channel: OTHER,
            })
            .await
            .unwrap();

        assert_eq!(tracker.member_count().await, 1);
        assert!(control.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn member_moving_away_counts_as_leave() {
        let (tracker, control) = tracker_with(vec![BOT, ALICE], true);
        tracker.resync(HOME).await.unwrap();

        tracker
            .handle_event(ChannelEvent::Moved {
                member: ALICE,
                from: HOME,
                to: OTHER,
            })
            .await
            .unwrap();

        assert_eq!(tracker.member_count().await, 0);
        assert_eq!(*control.writes.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn bot_moving_resyncs_destination() {
        let (tracker, _) = tracker_with(vec![BOT, ALICE], true);
        tracker
            .handle_event(ChannelEvent::Moved {
                member: BOT,
                from: HOME,
                to: OTHER,
            })
            .await
            .unwrap();

        assert_eq!(tracker.own_channel().await, Some(OTHER));
        assert_eq!(tracker.member_count().await, 1);
    }

    #[tokio::test]
    async fn auto_pause_disabled_issues_nothing() {
        let (tracker, control) = tracker_with(vec![BOT, ALICE], false);
        tracker.resync(HOME).await.unwrap();

        tracker
            .handle_event(ChannelEvent::Left {
                member: ALICE,
                channel: HOME,
            })
            .await
            .unwrap();

        assert!(control.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn joining_empty_channel_does_not_pause() {
        let (tracker, control) = tracker_with(vec![BOT], true);
        tracker.resync(HOME).await.unwrap();

        assert!(control.writes.lock().unwrap().is_empty());
    }
}
