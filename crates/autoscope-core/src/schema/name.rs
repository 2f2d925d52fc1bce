use std_util::str;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(src);
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    /// `TeamMember`: the name a record reports as its type.
    pub fn upper_camel_case(&self) -> String {
        str::upper_camel_case(&self.snake_case())
    }

    /// `team_member`
    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// `team_members`: the conventional table name.
    pub fn plural_snake_case(&self) -> String {
        str::pluralize(&self.snake_case())
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.upper_camel_case())
    }
}
