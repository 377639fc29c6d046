use super::template::{self, TemplateError};
use crate::core::mapping::ReferenceMap;
use crate::core::references::{ReferenceError, ReferenceId};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Names used in the generated TypeScript module.
///
/// The defaults produce the module the DNATCO viewer imports as `./reference-pdbs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    /// Module path the `References` union type is imported from.
    pub import_path: String,
    pub namespace: String,
    pub type_name: String,
    pub const_name: String,
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self {
            import_path: "./conformers".to_string(),
            namespace: "ReferencePdbs".to_string(),
            type_name: "Map".to_string(),
            const_name: "data".to_string(),
        }
    }
}

impl ModuleLayout {
    fn header(&self) -> String {
        format!(
            "import {{ References }} from '{}'\n\nexport namespace {} {{\nexport type {} = Record<References, string>;\nexport const {} = {{\n",
            self.import_path, self.namespace, self.type_name, self.const_name
        )
    }
}

const FOOTER: &str = "};\n}";

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Module header does not match the expected layout")]
    HeaderMismatch,

    #[error("Syntax error on line {line}: {kind}")]
    Syntax { line: usize, kind: SyntaxErrorKind },

    #[error("Invalid reference entry on line {line}: {source}")]
    Reference {
        line: usize,
        #[source]
        source: ReferenceError,
    },

    #[error("Unexpected content after the end of the module on line {line}")]
    TrailingContent { line: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("unterminated identifier key")]
    UnterminatedKey,
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Reader and writer for the generated reference module.
pub struct ReferenceModule;

impl ReferenceModule {
    /// Renders `map` as a TypeScript module, keeping the map's entry order.
    pub fn render(map: &ReferenceMap, layout: &ModuleLayout) -> String {
        let header = layout.header();
        let mut out = String::with_capacity(
            header.len() + map.total_bytes() + map.len() * 16 + FOOTER.len(),
        );
        out.push_str(&header);
        for (id, text) in map.iter() {
            out.push('\'');
            out.push_str(id.as_str());
            out.push_str("': `");
            out.push_str(&template::escape(text));
            out.push_str("`,\n");
        }
        out.push_str(FOOTER);
        out
    }

    pub fn write_to(
        map: &ReferenceMap,
        layout: &ModuleLayout,
        writer: &mut impl Write,
    ) -> io::Result<usize> {
        let rendered = Self::render(map, layout);
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(rendered.len())
    }

    /// Creates or truncates `path` and writes the rendered module into it.
    ///
    /// Returns the number of bytes written. The file is written in place, so an
    /// interrupted write can leave it truncated.
    pub fn write_to_path<P: AsRef<Path>>(
        map: &ReferenceMap,
        layout: &ModuleLayout,
        path: P,
    ) -> io::Result<usize> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(map, layout, &mut writer)
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        layout: &ModuleLayout,
    ) -> Result<ReferenceMap, ModuleError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, layout)
    }

    /// Parses a module produced by [`ReferenceModule::render`] back into a map.
    ///
    /// Whitespace between entries is tolerated. Completeness is not checked here; use
    /// [`ReferenceMap::ensure_complete`] on the result.
    pub fn parse(input: &str, layout: &ModuleLayout) -> Result<ReferenceMap, ModuleError> {
        let header = layout.header();
        if !input.starts_with(&header) {
            return Err(ModuleError::HeaderMismatch);
        }

        let mut cursor = Cursor {
            input,
            pos: header.len(),
        };
        let mut map = ReferenceMap::new();

        loop {
            cursor.skip_whitespace();
            if cursor.eat("};") {
                break;
            }

            let entry_line = cursor.line();
            let id = cursor.read_key()?;
            cursor.skip_whitespace();
            cursor.expect(":", "':' after identifier key")?;
            cursor.skip_whitespace();
            cursor.expect("`", "template literal")?;
            let text = cursor.read_template()?;
            map.insert(id, text)
                .map_err(|source| ModuleError::Reference {
                    line: entry_line,
                    source,
                })?;

            cursor.skip_whitespace();
            if !cursor.eat(",") && !cursor.rest().starts_with("};") {
                return Err(cursor.syntax_error(SyntaxErrorKind::Expected("',' or '};'")));
            }
        }

        cursor.skip_whitespace();
        cursor.expect("}", "closing namespace brace")?;
        cursor.skip_whitespace();
        if !cursor.rest().is_empty() {
            return Err(ModuleError::TrailingContent {
                line: cursor.line(),
            });
        }

        Ok(map)
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn line(&self) -> usize {
        self.input[..self.pos].matches('\n').count() + 1
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str, what: &'static str) -> Result<(), ModuleError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.syntax_error(SyntaxErrorKind::Expected(what)))
        }
    }

    fn read_key(&mut self) -> Result<ReferenceId, ModuleError> {
        self.expect("'", "quoted identifier key")?;
        let rest = self.rest();
        let end = rest
            .find(['\'', '\n'])
            .filter(|&end| rest[end..].starts_with('\''))
            .ok_or_else(|| self.syntax_error(SyntaxErrorKind::UnterminatedKey))?;

        let line = self.line();
        let id = rest[..end]
            .parse::<ReferenceId>()
            .map_err(|source| ModuleError::Reference { line, source })?;
        self.pos += end + 1;
        Ok(id)
    }

    fn read_template(&mut self) -> Result<String, ModuleError> {
        let (text, consumed) = template::read_literal(self.rest())
            .map_err(|e| self.syntax_error(SyntaxErrorKind::Template(e)))?;
        self.pos += consumed;
        Ok(text)
    }

    fn syntax_error(&self, kind: SyntaxErrorKind) -> ModuleError {
        ModuleError::Syntax {
            line: self.line(),
            kind,
        }
    }
}
