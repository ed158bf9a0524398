/*!
 * Plain text writer for treedump output
 *
 * Layout of one directory at depth `d` (indent = 4 * d spaces,
 * sub-indent = 4 * (d + 1) spaces):
 *
 * ```text
 * <indent><dir name>/
 * <sub-indent><file name>
 * <sub-indent><'=' repeated to the length of the file name>
 * <sub-indent><file content>
 *
 * ```
 *
 * Only the first line of a content block carries the sub-indent. Lines inside
 * the content are written untouched.
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{DumpError, Result};
use crate::types::FileContent;

/// Width of one indentation level
pub const INDENT_WIDTH: usize = 4;

/// Indentation for the given depth
pub fn indent(depth: usize) -> String {
    " ".repeat(INDENT_WIDTH * depth)
}

/// Text writer for directory headers and file blocks
pub struct TextWriter<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl TextWriter<BufWriter<File>> {
    /// Create (or truncate) the output file and wrap it in a buffered writer
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| DumpError::output(path, e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TextWriter<W> {
    /// Wrap any writer
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Number of bytes emitted so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Write a directory header line
    pub fn write_directory(&mut self, name: &str, depth: usize) -> io::Result<()> {
        let line = format!("{}{}/\n", indent(depth), name);
        self.emit(&line)
    }

    /// Write the header, underline and content block of one file.
    ///
    /// `depth` is the depth of the directory holding the file.
    pub fn write_file(
        &mut self,
        name: &str,
        depth: usize,
        content: &FileContent,
    ) -> io::Result<()> {
        let sub_indent = indent(depth + 1);
        let underline = "=".repeat(name.chars().count());

        let mut block = format!("{sub_indent}{name}\n{sub_indent}{underline}\n");
        match content {
            FileContent::Text(text) => {
                block.push_str(&sub_indent);
                block.push_str(text);
                block.push_str("\n\n");
            }
            FileContent::Unreadable(message) => {
                block.push_str(&format!(
                    "{sub_indent}[Error reading file: {message}]\n\n"
                ));
            }
        }
        self.emit(&block)
    }

    /// Flush buffered output and hand back the inner writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn emit(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut TextWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut writer = TextWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn directory_header_is_indented_by_depth() {
        assert_eq!(render(|w| w.write_directory("root", 0)), "root/\n");
        assert_eq!(render(|w| w.write_directory("b", 2)), "        b/\n");
    }

    #[test]
    fn file_block_indents_only_first_content_line() {
        let out = render(|w| {
            w.write_file(
                "main.rs",
                1,
                &FileContent::Text("fn main() {\n}\n".to_string()),
            )
        });
        assert_eq!(
            out,
            "        main.rs\n        =======\n        fn main() {\n}\n\n\n"
        );
    }

    #[test]
    fn underline_counts_characters_not_bytes() {
        let out = render(|w| w.write_file("héllo.txt", 0, &FileContent::Text(String::new())));
        let underline = out.lines().nth(1).unwrap();
        assert_eq!(underline, "    =========");
    }

    #[test]
    fn unreadable_file_gets_error_marker() {
        let out = render(|w| {
            w.write_file("blob.bin", 0, &FileContent::Unreadable("bad utf-8".into()))
        });
        assert_eq!(
            out,
            "    blob.bin\n    ========\n    [Error reading file: bad utf-8]\n\n"
        );
    }

    #[test]
    fn tracks_bytes_written() {
        let mut writer = TextWriter::new(Vec::new());
        writer.write_directory("abc", 0).unwrap();
        assert_eq!(writer.bytes_written(), 5);
    }
}
