//! Report rendering.
//!
//! Turns the filtered tree plus per-file content decisions into the final
//! Markdown or plain-text document. Both formats render from the same
//! [`Report`] value; nothing here touches the filesystem, so identical
//! input yields byte-identical output.

use std::path::PathBuf;

use crate::guard::FileContent;
use crate::tree::DirectoryNode;

/// Static extension -> Markdown fence language table.
///
/// Unknown extensions fall back to an untagged fence.
const LANGUAGE_TAGS: &[(&str, &str)] = &[
    (".py", "python"),
    (".cs", "csharp"),
    (".ts", "typescript"),
    (".js", "javascript"),
    (".rs", "rust"),
    (".html", "html"),
    (".scss", "scss"),
    (".json", "json"),
    (".toml", "toml"),
    (".md", "markdown"),
    (".csproj", "xml"),
    (".sln", ""),
    (".txt", ""),
];

/// Look up the fence language tag for an extension.
pub fn language_tag(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else { return "" };
    for (known, tag) in LANGUAGE_TAGS {
        if *known == ext {
            return tag;
        }
    }
    ""
}

/// ASCII banner prepended to reports unless suppressed.
const LOGO: &str = r"   _____          _      _____           _ _
  / ____|        | |    / ____|         (_) |
 | |     ___   __| | __| (___   ___ _ __ _| |__   ___
 | |    / _ \ / _` |/ _ \___ \ / __| '__| | '_ \ / _ \
 | |___| (_) | (_| |  __/___) | (__| |  | | |_) |  __/
  \_____\___/ \__,_|\___|____/ \___|_|  |_|_.__/ \___|";

/// One file of the contents section.
#[derive(Debug, Clone)]
pub struct ReportFile {
    /// Path relative to the source root, forward-slash separated.
    pub rel_path: String,
    /// Fence language tag, possibly empty.
    pub language: &'static str,
    /// Content-handling decision from the size guard.
    pub content: FileContent,
}

/// The assembled report, immutable once built.
#[derive(Debug)]
pub struct Report {
    /// Absolute path that was scanned.
    pub root: PathBuf,
    /// Filtered, sorted directory tree.
    pub tree: DirectoryNode,
    /// Included files in tree order, contents already read.
    pub files: Vec<ReportFile>,
}

impl Report {
    /// Render the Markdown document.
    pub fn to_markdown(&self, show_logo: bool) -> String {
        let mut out = String::with_capacity(8192);

        if show_logo {
            out.push_str("```\n");
            out.push_str(LOGO);
            out.push_str("\n```\n\n");
        }

        out.push_str("# CodeScribe report\n\n");
        out.push_str(&format!("Scanned path: `{}`\n\n", self.root.display()));

        out.push_str("## 1. Project tree\n\n");
        render_tree_markdown(&self.tree, 0, &mut out);
        out.push('\n');

        out.push_str("## 2. File contents\n\n");

        out.push_str("### Contents\n\n");
        for file in &self.files {
            out.push_str(&format!(
                "- [{}](#{})\n",
                file.rel_path,
                anchor_slug(&file.rel_path)
            ));
        }
        out.push('\n');

        for file in &self.files {
            out.push_str(&format!("### {}\n", file.rel_path));
            out.push_str(&format!("<a id='{}'></a>\n\n", anchor_slug(&file.rel_path)));

            match &file.content {
                FileContent::Full(text) => {
                    push_fenced(&mut out, file.language, text);
                }
                FileContent::Truncated {
                    text,
                    omitted_bytes,
                } => {
                    push_fenced(&mut out, file.language, text);
                    out.push_str(&format!(
                        "*[truncated: {omitted_bytes} bytes omitted]*\n"
                    ));
                }
                FileContent::Binary => {
                    out.push_str("[binary content omitted]\n");
                }
                FileContent::Unreadable(message) => {
                    out.push_str(&format!("**Read error:** {message}\n"));
                }
            }
            out.push('\n');
        }

        out
    }

    /// Render the plain-text document.
    pub fn to_text(&self, show_logo: bool) -> String {
        let mut out = String::with_capacity(8192);

        if show_logo {
            out.push_str(LOGO);
            out.push_str("\n\n");
        }

        out.push_str("CodeScribe report\n");
        out.push_str(&format!("Scanned path: {}\n\n", self.root.display()));

        out.push_str("PROJECT TREE\n============\n\n");
        render_tree_text(&self.tree, 0, &mut out);
        out.push('\n');

        out.push_str("FILE CONTENTS\n=============\n\n");
        for file in &self.files {
            out.push_str(&format!("==== {} ====\n", file.rel_path));
            match &file.content {
                FileContent::Full(text) => {
                    out.push_str(text);
                    ensure_newline(&mut out);
                }
                FileContent::Truncated {
                    text,
                    omitted_bytes,
                } => {
                    out.push_str(text);
                    ensure_newline(&mut out);
                    out.push_str(&format!("[truncated: {omitted_bytes} bytes omitted]\n"));
                }
                FileContent::Binary => {
                    out.push_str("[binary content omitted]\n");
                }
                FileContent::Unreadable(message) => {
                    out.push_str(&format!("Read error: {message}\n"));
                }
            }
            out.push('\n');
        }

        out
    }
}

/// Anchor slug for the table of contents, stable across runs.
fn anchor_slug(rel_path: &str) -> String {
    rel_path
        .to_lowercase()
        .replace([' ', '/', '\\'], "-")
}

fn push_fenced(out: &mut String, language: &str, text: &str) {
    out.push_str(&format!("```{language}\n"));
    out.push_str(text);
    ensure_newline(out);
    out.push_str("```\n");
}

fn ensure_newline(out: &mut String) {
    if !out.ends_with('\n') {
        out.push('\n');
    }
}

fn render_tree_markdown(node: &DirectoryNode, depth: usize, out: &mut String) {
    for dir in node.dirs() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("- **{}/**\n", dir.name));
        render_tree_markdown(dir, depth + 1, out);
    }
    for file in node.files() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("- {}\n", file.name));
    }
}

fn render_tree_text(node: &DirectoryNode, depth: usize, out: &mut String) {
    for dir in node.dirs() {
        out.push_str(&"    ".repeat(depth));
        out.push_str(&format!("{}/\n", dir.name));
        render_tree_text(dir, depth + 1, out);
    }
    for file in node.files() {
        out.push_str(&"    ".repeat(depth));
        out.push_str(&format!("{}\n", file.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FileEntry;
    use std::path::PathBuf;

    fn sample_report() -> Report {
        let mut tree = DirectoryNode::new("project", "");
        let mut src = DirectoryNode::new("src", "src");
        src.add_file(FileEntry {
            name: "main.py".to_string(),
            rel_path: PathBuf::from("src/main.py"),
            path: PathBuf::from("/project/src/main.py"),
            size: 12,
            extension: Some(".py".to_string()),
        });
        tree.add_dir(src);
        tree.add_file(FileEntry {
            name: "README.md".to_string(),
            rel_path: PathBuf::from("README.md"),
            path: PathBuf::from("/project/README.md"),
            size: 5,
            extension: Some(".md".to_string()),
        });
        tree.sort();

        Report {
            root: PathBuf::from("/project"),
            tree,
            files: vec![
                ReportFile {
                    rel_path: "src/main.py".to_string(),
                    language: "python",
                    content: FileContent::Full("print('hi')\n".to_string()),
                },
                ReportFile {
                    rel_path: "README.md".to_string(),
                    language: "markdown",
                    content: FileContent::Full("# hi\n".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_language_tag_lookup() {
        assert_eq!(language_tag(Some(".py")), "python");
        assert_eq!(language_tag(Some(".csproj")), "xml");
        assert_eq!(language_tag(Some(".weird")), "");
        assert_eq!(language_tag(None), "");
    }

    #[test]
    fn test_markdown_structure() {
        let report = sample_report();
        let md = report.to_markdown(false);

        assert!(md.contains("# CodeScribe report"));
        assert!(md.contains("## 1. Project tree"));
        assert!(md.contains("- **src/**"));
        assert!(md.contains("  - main.py"));
        assert!(md.contains("## 2. File contents"));
        assert!(md.contains("### src/main.py"));
        assert!(md.contains("```python\nprint('hi')\n```"));
        assert!(md.contains("[src/main.py](#src-main.py)"));
    }

    #[test]
    fn test_logo_toggle() {
        let report = sample_report();
        assert!(report.to_markdown(true).starts_with("```\n"));
        assert!(!report.to_markdown(false).contains("____"));
    }

    #[test]
    fn test_text_has_no_fences() {
        let report = sample_report();
        let text = report.to_text(false);

        assert!(!text.contains("```"));
        assert!(text.contains("==== src/main.py ===="));
        assert!(text.contains("PROJECT TREE"));
        assert!(text.contains("src/\n    main.py"));
    }

    #[test]
    fn test_truncation_marker() {
        let mut report = sample_report();
        report.files[0].content = FileContent::Truncated {
            text: "partial".to_string(),
            omitted_bytes: 2048,
        };

        let md = report.to_markdown(false);
        assert!(md.contains("*[truncated: 2048 bytes omitted]*"));

        let text = report.to_text(false);
        assert!(text.contains("[truncated: 2048 bytes omitted]"));
    }

    #[test]
    fn test_binary_and_unreadable_placeholders() {
        let mut report = sample_report();
        report.files[0].content = FileContent::Binary;
        report.files[1].content = FileContent::Unreadable("permission denied".to_string());

        let md = report.to_markdown(false);
        assert!(md.contains("[binary content omitted]"));
        assert!(md.contains("**Read error:** permission denied"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let report = sample_report();
        assert_eq!(report.to_markdown(true), report.to_markdown(true));
        assert_eq!(report.to_text(true), report.to_text(true));
    }

    #[test]
    fn test_tree_and_contents_share_order() {
        let report = sample_report();
        let md = report.to_markdown(false);

        let tree_main = md.find("- main.py").unwrap();
        let tree_readme = md.find("- README.md").unwrap();
        let contents_main = md.find("### src/main.py").unwrap();
        let contents_readme = md.find("### README.md").unwrap();

        assert!(tree_main < tree_readme);
        assert!(contents_main < contents_readme);
    }
}
