//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStorePort, HoverMenuPort};
use crate::application::queries::{GetAudioQuery, GetAudioResponse, GetPlaybackQuery};
use crate::domain::audio::AudioKey;

fn load(store: &dyn AudioStorePort, key: AudioKey) -> Result<GetAudioResponse, ApplicationError> {
    let clip = store
        .get(&key)
        .ok_or_else(|| ApplicationError::not_found("Audio", key.as_str()))?;
    Ok(GetAudioResponse {
        filename: key.download_filename(),
        content_type: clip.mime_type().to_string(),
        audio_data: clip.into_data(),
        audio_key: key,
    })
}

/// GetAudio Handler - 获取音频数据
pub struct GetAudioHandler {
    store: Arc<dyn AudioStorePort>,
}

impl GetAudioHandler {
    pub fn new(store: Arc<dyn AudioStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        load(self.store.as_ref(), query.audio_key)
    }
}

/// GetPlayback Handler - 通过悬停菜单的临时令牌获取音频
pub struct GetPlaybackHandler {
    store: Arc<dyn AudioStorePort>,
    hover_menus: Arc<dyn HoverMenuPort>,
}

impl GetPlaybackHandler {
    pub fn new(store: Arc<dyn AudioStorePort>, hover_menus: Arc<dyn HoverMenuPort>) -> Self {
        Self { store, hover_menus }
    }

    pub async fn handle(&self, query: GetPlaybackQuery) -> Result<GetAudioResponse, ApplicationError> {
        let key = self.hover_menus.resolve_playback(&query.token)?;
        load(self.store.as_ref(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioClip;
    use crate::infrastructure::memory::{InMemoryAudioStore, InMemoryHoverMenus};

    #[tokio::test]
    async fn test_get_audio() {
        let store = InMemoryAudioStore::new().arc();
        let key = AudioKey::new("audio-1").unwrap();
        store.put(key.clone(), AudioClip::wav(vec![1, 2, 3]));
        let handler = GetAudioHandler::new(store);

        let response = handler.handle(GetAudioQuery { audio_key: key }).await.unwrap();
        assert_eq!(response.audio_data, vec![1, 2, 3]);
        assert_eq!(response.content_type, "audio/wav");
        assert_eq!(response.filename, "audio-audio-1.wav");

        let missing = handler
            .handle(GetAudioQuery {
                audio_key: AudioKey::new("nope").unwrap(),
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_playback_token_lifecycle() {
        let store = InMemoryAudioStore::new().arc();
        let menus = InMemoryHoverMenus::new().arc();
        let key = AudioKey::new("k1").unwrap();
        store.put(key.clone(), AudioClip::wav(vec![9]));
        let menu = menus.open("hl-1", &key, String::new());
        let handler = GetPlaybackHandler::new(store, menus.clone());

        let response = handler
            .handle(GetPlaybackQuery {
                token: menu.playback_token.clone(),
            })
            .await
            .unwrap();
        assert_eq!(response.audio_key, key);

        menus.close(&menu.menu_id, None).unwrap();
        assert!(handler
            .handle(GetPlaybackQuery {
                token: menu.playback_token,
            })
            .await
            .is_err());
    }
}
