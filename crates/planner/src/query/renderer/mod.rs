//! Defines the core rendering trait and context for converting AST to SQL.

use model::core::value::Value;

use crate::query::dialect::Dialect;

pub mod expr;
pub mod select;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
    inline_params: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
            inline_params: false,
        }
    }

    /// A renderer that writes values as SQL literals instead of placeholders.
    /// The output is for logs and diagnostics, never for execution.
    pub fn inlined(dialect: &'a dyn Dialect) -> Self {
        Self {
            inline_params: true,
            ..Self::new(dialect)
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        if self.inline_params {
            self.sql.push_str(&value.to_string());
            return;
        }
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    pub fn push_list<T: Render>(&mut self, items: &[T]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            item.render(self);
        }
    }
}

/// Renders a node with dialect placeholders.
pub fn render<T: Render>(node: &T, dialect: &dyn Dialect) -> (String, Vec<Value>) {
    let mut renderer = Renderer::new(dialect);
    node.render(&mut renderer);
    let (sql, params) = renderer.finish();
    tracing::trace!(dialect = %dialect.name(), %sql, params = params.len(), "Rendered SQL");
    (sql, params)
}

/// Renders a node with every parameter inlined as a literal.
pub fn render_inlined<T: Render>(node: &T, dialect: &dyn Dialect) -> String {
    let mut renderer = Renderer::inlined(dialect);
    node.render(&mut renderer);
    renderer.finish().0
}
