// Fire-and-forget playback of word recordings.
use bevy::asset::AssetLoadFailedEvent;
use bevy::prelude::*;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, report_failed_clips);
    }
}

/// Plays `path` once. The entity despawns itself when playback ends.
pub fn play_clip(commands: &mut Commands, asset_server: &AssetServer, path: &'static str) {
    debug!("Playing {path}");
    commands.spawn((
        AudioPlayer::<AudioSource>(asset_server.load(path)),
        PlaybackSettings::DESPAWN,
    ));
}

// A clip that fails to load never plays; the learner can press again.
fn report_failed_clips(mut failures: MessageReader<AssetLoadFailedEvent<AudioSource>>) {
    for failure in failures.read() {
        error!("Error playing sound {}: {}", failure.path, failure.error);
    }
}
