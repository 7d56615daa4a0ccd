use std::fmt;

use serde::Serialize;

use super::{
    indexes::INDEXES,
    routines::{EXTENSIONS, SEARCH_FUNCTIONS, TRIGGER_FUNCTIONS, triggers, views},
    schema::{Edition, SchemaName},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Extension,
    Function,
    Table,
    Index,
    Trigger,
    View,
}

impl StepKind {
    /// Failures of these steps are logged and skipped instead of aborting
    /// the run.
    pub fn is_best_effort(self) -> bool {
        matches!(self, StepKind::Extension | StepKind::Index | StepKind::Trigger)
    }

    fn heading(self) -> &'static str {
        match self {
            StepKind::Extension => "Extensions",
            StepKind::Function => "Functions",
            StepKind::Table => "Tables",
            StepKind::Index => "Indexes",
            StepKind::Trigger => "Triggers",
            StepKind::View => "Views",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Extension => "extension",
            StepKind::Function => "function",
            StepKind::Table => "table",
            StepKind::Index => "index",
            StepKind::Trigger => "trigger",
            StepKind::View => "view",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StepKind,
    pub name: String,
    pub sql: String,
}

impl Statement {
    pub fn is_best_effort(&self) -> bool {
        self.kind.is_best_effort()
    }
}

/// The ordered DDL for one schema and edition, already rendered.
#[derive(Debug, Clone)]
pub struct SchemaPlan {
    pub schema: SchemaName,
    pub edition: Edition,
    pub statements: Vec<Statement>,
}

impl SchemaPlan {
    pub fn new(schema: &SchemaName, edition: Edition) -> Self {
        let mut statements = Vec::new();
        let mut push = |kind: StepKind, name: &str, template: &str| {
            statements.push(Statement {
                kind,
                name: name.to_string(),
                sql: schema.render(template.trim()),
            });
        };

        for extension in EXTENSIONS {
            push(
                StepKind::Extension,
                extension,
                &format!("CREATE EXTENSION IF NOT EXISTS \"{}\"", extension),
            );
        }

        for function in TRIGGER_FUNCTIONS.iter().filter(|f| f.included_in(edition)) {
            push(StepKind::Function, function.name, function.ddl);
        }

        for table in edition.tables() {
            push(StepKind::Table, table.name, table.ddl);
        }

        for index in INDEXES.iter().filter(|i| edition.includes_table(i.table)) {
            push(StepKind::Index, index.name, index.ddl);
        }

        for trigger in triggers(edition) {
            push(StepKind::Trigger, &trigger.name, &trigger.ddl);
        }

        for view in views(edition) {
            push(StepKind::View, view.name, view.ddl);
        }

        for function in SEARCH_FUNCTIONS.iter().filter(|f| f.included_in(edition)) {
            push(StepKind::Function, function.name, function.ddl);
        }

        Self {
            schema: schema.clone(),
            edition,
            statements,
        }
    }

    /// Drops and recreates the target schema. Everything in it is lost.
    pub fn reset_statements(&self) -> [String; 2] {
        [
            format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema),
            format!("CREATE SCHEMA {}", self.schema),
        ]
    }

    pub fn count(&self, kind: StepKind) -> usize {
        self.statements.iter().filter(|s| s.kind == kind).count()
    }

    pub fn names(&self, kind: StepKind) -> impl Iterator<Item = &str> {
        self.statements
            .iter()
            .filter(move |s| s.kind == kind)
            .map(|s| s.name.as_str())
    }

    /// The whole plan as one SQL script, reset included.
    pub fn render_script(&self) -> String {
        let mut script = format!(
            "-- MyCheff schema '{}' ({} edition)\n\n",
            self.schema, self.edition
        );
        for statement in self.reset_statements() {
            script.push_str(&statement);
            script.push_str(";\n");
        }

        let mut current: Option<StepKind> = None;
        for statement in &self.statements {
            if current != Some(statement.kind) {
                script.push_str(&format!("\n-- {}\n", statement.kind.heading()));
                current = Some(statement.kind);
            }
            script.push_str(&statement.sql);
            script.push_str(";\n");
        }
        script
    }
}
