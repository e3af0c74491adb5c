//! In-Memory Hover Menu Registry

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{CloseOutcome, HoverError, HoverMenu, HoverMenuPort};
use crate::domain::audio::AudioKey;

/// 内存悬停菜单注册表
///
/// - menus: menu_id -> 菜单
/// - by_highlight: 高亮元素 id -> menu_id（去重）
/// - tokens: 播放令牌 -> 音频键
pub struct InMemoryHoverMenus {
    menus: DashMap<String, HoverMenu>,
    by_highlight: DashMap<String, String>,
    tokens: DashMap<String, AudioKey>,
}

impl InMemoryHoverMenus {
    pub fn new() -> Self {
        Self {
            menus: DashMap::new(),
            by_highlight: DashMap::new(),
            tokens: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn remove_menu(&self, menu_id: &str) -> bool {
        let Some((_, menu)) = self.menus.remove(menu_id) else {
            return false;
        };
        self.by_highlight
            .remove_if(&menu.highlight_id, |_, id| id == menu_id);
        self.tokens.remove(&menu.playback_token);
        tracing::debug!(
            menu_id = %menu_id,
            audio_key = %menu.audio_key,
            "Hover menu closed"
        );
        true
    }
}

impl Default for InMemoryHoverMenus {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverMenuPort for InMemoryHoverMenus {
    fn open(&self, highlight_id: &str, audio_key: &AudioKey, prompt: String) -> HoverMenu {
        let existing = self
            .by_highlight
            .get(highlight_id)
            .map(|id| id.clone())
            .and_then(|id| self.menus.get(&id).map(|m| m.clone()));

        if let Some(menu) = existing {
            if &menu.audio_key == audio_key {
                return menu;
            }
            // 高亮已换绑新的音频
            self.remove_menu(&menu.menu_id);
        }

        let menu = HoverMenu {
            menu_id: Uuid::new_v4().to_string(),
            highlight_id: highlight_id.to_string(),
            audio_key: audio_key.clone(),
            playback_token: Uuid::new_v4().simple().to_string(),
            download_filename: audio_key.download_filename(),
            prompt,
            opened_at: Utc::now(),
        };

        self.tokens
            .insert(menu.playback_token.clone(), audio_key.clone());
        self.by_highlight
            .insert(menu.highlight_id.clone(), menu.menu_id.clone());
        self.menus.insert(menu.menu_id.clone(), menu.clone());

        tracing::debug!(
            menu_id = %menu.menu_id,
            highlight_id = %highlight_id,
            audio_key = %audio_key,
            "Hover menu opened"
        );
        menu
    }

    fn close(&self, menu_id: &str, related_target: Option<&str>) -> Result<CloseOutcome, HoverError> {
        let highlight_id = self
            .menus
            .get(menu_id)
            .map(|m| m.highlight_id.clone())
            .ok_or_else(|| HoverError::MenuNotFound(menu_id.to_string()))?;

        if let Some(target) = related_target {
            if target == menu_id || target == highlight_id {
                return Ok(CloseOutcome::Ignored);
            }
        }

        self.remove_menu(menu_id);
        Ok(CloseOutcome::Closed)
    }

    fn close_for_key(&self, audio_key: &AudioKey) -> usize {
        let ids: Vec<String> = self
            .menus
            .iter()
            .filter(|m| &m.audio_key == audio_key)
            .map(|m| m.menu_id.clone())
            .collect();
        ids.iter().filter(|id| self.remove_menu(id)).count()
    }

    fn resolve_playback(&self, token: &str) -> Result<AudioKey, HoverError> {
        self.tokens
            .get(token)
            .map(|k| k.clone())
            .ok_or_else(|| HoverError::TokenNotFound(token.to_string()))
    }

    fn open_menus(&self) -> Vec<HoverMenu> {
        let mut menus: Vec<HoverMenu> = self.menus.iter().map(|m| m.clone()).collect();
        menus.sort_by_key(|m| m.opened_at);
        menus
    }
}
