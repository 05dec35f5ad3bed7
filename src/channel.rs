use crate::ChannelNameError;

/// A lower-cased Twitch login, e.g. `museun`
///
/// Only `a-z`, `0-9` and `_` get through, so it can go into a url path as is.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ChannelName(Box<str>);

impl ChannelName {
    /// Normalizes user input
    pub fn parse(input: &str) -> Result<Self, ChannelNameError> {
        let name = input.trim().to_lowercase();
        if name.is_empty() {
            return Err(ChannelNameError::Blank);
        }

        let invalid = name
            .chars()
            .find(|&ch| !matches!(ch, 'a'..='z' | '0'..='9' | '_'));
        if let Some(ch) = invalid {
            return Err(ChannelNameError::Invalid { name, ch });
        }

        Ok(Self(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::ops::Deref for ChannelName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
