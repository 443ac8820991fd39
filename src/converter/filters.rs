//! Static deny/allow tables consulted while walking a source tree.

use std::ffi::OsStr;
use std::path::Path;

/// Directory names that are never mirrored or descended into
pub const EXCLUDED_DIRS: &[&str] = &[
    // Version control
    ".git", ".hg", ".svn", ".bzr",
    // Python caches
    "__pycache__", ".pytest_cache", ".tox",
    // Node.js
    "node_modules", ".npm", "dist", "build",
    // IDE and editor state
    ".vscode", ".idea", ".vs",
    // Vendored packages
    "vendor", "packages",
    // OS metadata
    ".DS_Store", "Thumbs.db",
    // Virtual environments
    "venv", "env", ".env",
    // Build outputs
    "target", "bin", "obj",
    // Build tool caches
    ".gradle", ".m2",
    // Coverage reports
    "coverage", ".nyc_output",
];

/// Hidden directories that are still converted
pub const ALLOWED_HIDDEN_DIRS: &[&str] = &[".github"];

/// OS metadata files; replaced by a placeholder and tagged as excluded
pub const OS_METADATA_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Lowercase extensions (with the leading dot) of formats that are never converted
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    // Executables and libraries
    ".exe", ".dll", ".so", ".dylib", ".a", ".lib", ".o", ".obj", ".bin",
    // Archives
    ".zip", ".tar", ".gz", ".bz2", ".xz", ".7z", ".rar", ".iso",
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".ico", ".webp", ".tiff",
    // Video
    ".mp4", ".avi", ".mov", ".wmv", ".flv", ".webm", ".mkv", ".m4v",
    // Audio
    ".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a",
    // Office documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // Fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
    // Databases
    ".db", ".sqlite", ".sqlite3", ".mdb",
    // Bytecode and design tools
    ".jar", ".war", ".ear", ".class", ".pyc", ".pyo", ".pyd",
    ".swf", ".fla", ".psd", ".ai", ".sketch",
];

/// Extensions known to hold text
///
/// Informational only: classification is decided by the deny table and content sniffing.
pub const TEXT_EXTENSIONS: &[&str] = &[
    // Source code
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".c", ".cpp", ".cc", ".cxx", ".h", ".hpp",
    ".cs", ".vb", ".php", ".rb", ".go", ".rs", ".swift", ".kt", ".scala", ".clj", ".elm",
    ".dart", ".lua", ".perl", ".pl", ".r", ".sh", ".bash", ".zsh", ".fish", ".ps1",
    // Web
    ".html", ".htm", ".css", ".scss", ".sass", ".less", ".xml", ".xsl", ".xslt",
    // Configuration and data
    ".json", ".yaml", ".yml", ".toml", ".ini", ".cfg", ".conf", ".properties",
    ".env", ".gitignore", ".gitattributes", ".dockerignore", ".editorconfig",
    // Documentation
    ".md", ".rst", ".txt", ".rtf", ".tex", ".adoc", ".org",
    // Build files
    ".makefile", ".cmake", ".gradle", ".sbt", ".pom", ".gemspec", ".podspec",
    // Others
    ".sql", ".graphql", ".proto", ".thrift", ".avro", ".zig", ".nim", ".crystal",
];

/// Returns the lowercased final extension of `path` with its leading dot
///
/// Dotfiles such as `.gitignore` have no extension, matching `Path::extension`.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Checks whether a directory with this base name must be skipped entirely
pub fn is_excluded_dir(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    if EXCLUDED_DIRS.contains(&name.as_ref()) {
        return true;
    }
    name.starts_with('.') && !ALLOWED_HIDDEN_DIRS.contains(&name.as_ref())
}

/// Checks whether a file is OS metadata rather than project content
pub fn is_os_metadata_file(name: &OsStr) -> bool {
    OS_METADATA_FILES.contains(&name.to_string_lossy().as_ref())
}

/// Checks whether a file's extension marks it as a binary format
pub fn has_excluded_extension(path: &Path) -> bool {
    dotted_extension(path)
        .map_or(false, |ext| EXCLUDED_EXTENSIONS.contains(&ext.as_str()))
}

/// Checks whether a file's extension is a known text format
pub fn is_known_text_extension(path: &Path) -> bool {
    dotted_extension(path)
        .map_or(false, |ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

/// Renders a table sorted and comma-joined, as shown in the summary report
pub fn sorted_listing(table: &[&str]) -> String {
    let mut entries = table.to_vec();
    entries.sort_unstable();
    entries.dedup();
    entries.join(", ")
}
