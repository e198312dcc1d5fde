/// Accent colour of a rendered message. The Discord layer maps it to an RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Gold,
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-independent description of one result message.
///
/// Built by [`Render`] implementations and converted into an embed at the edge,
/// so formatting can be tested without any Discord types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub fields: Vec<MessageField>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    pub accent: Accent,
}

impl RelayMessage {
    pub fn new(title: impl Into<String>, accent: Accent) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: None,
            fields: Vec::new(),
            thumbnail: None,
            footer: None,
            accent,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(MessageField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Look up a field value by name.
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Anything that can be shown to the user as a single result message.
pub trait Render {
    fn render(&self) -> RelayMessage;
}
