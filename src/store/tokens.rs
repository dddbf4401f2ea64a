use anyhow::Result;

use super::{ConsoleStore, TOKEN_ENV};

impl ConsoleStore {
    pub fn token_key(base_url: &str) -> String {
        base_url.trim_end_matches('/').to_string()
    }

    /// The stored token for `base_url`; `$NVI_CONSOLE_TOKEN` wins when set.
    pub fn get_token(&self, base_url: &str) -> Result<Option<String>> {
        if let Ok(t) = std::env::var(TOKEN_ENV)
            && !t.trim().is_empty()
        {
            return Ok(Some(t.trim().to_string()));
        }
        let st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        Ok(st.tokens.get(&Self::token_key(base_url)).cloned())
    }

    pub fn set_token(&self, base_url: &str, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        st.tokens
            .insert(Self::token_key(base_url), token.to_string());
        self.write_state(&st)
    }

    pub fn clear_token(&self, base_url: &str) -> Result<()> {
        let mut st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported console state version {}", st.version);
        }
        st.tokens.remove(&Self::token_key(base_url));
        self.write_state(&st)
    }
}
