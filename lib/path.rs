//! String-level path manipulation.
//!
//! Nothing in here touches the filesystem. Paths are `/`-separated strings,
//! the way they appear in build settings.

/// Lexically normalize a path.
///
/// Removes duplicate separators, `.` components, and `..` components
/// together with the component before them. Leading `..` components of a
/// relative path are kept. An empty path stays empty, and a relative path
/// that normalizes to nothing becomes `.`.
pub fn normalize(path: &str) -> String {
	if path.is_empty() {
		return String::new();
	}

	let absolute = path.starts_with('/');
	let mut components: Vec<&str> = Vec::new();

	// Leading `..` components which can not be removed anymore.
	let mut fixed = 0;

	for component in path.split('/') {
		match component {
			"" | "." => {}
			".." => {
				if components.len() > fixed {
					components.pop();
				} else if !absolute {
					components.push("..");
					fixed += 1;
				}
			}
			c => components.push(c),
		}
	}

	let joined = components.join("/");
	if absolute {
		format!("/{}", joined)
	} else if joined.is_empty() {
		".".to_string()
	} else {
		joined
	}
}

/// Check if a path is absolute.
pub fn is_absolute(path: &str) -> bool {
	path.starts_with('/')
}

/// Resolve `path` relative to `base`, and normalize the result.
///
/// Absolute paths are only normalized. An empty `base` leaves relative paths
/// relative.
pub fn resolve_relative(path: &str, base: &str) -> String {
	if is_absolute(path) || base.is_empty() {
		normalize(path)
	} else {
		normalize(&format!("{}/{}", base, path))
	}
}

/// The directory containing `path`.
///
/// Returns `.` for a bare file name, and `/` for files in the root.
pub fn dir_name(path: &str) -> &str {
	match path.rfind('/') {
		None => ".",
		Some(0) => "/",
		Some(n) => &path[..n],
	}
}

/// The last component of `path`.
pub fn base_name(path: &str) -> &str {
	match path.rfind('/') {
		None => path,
		Some(n) => &path[n + 1..],
	}
}

/// The last component of `path`, without its extension.
pub fn base_name_without_extension(path: &str) -> &str {
	let base = base_name(path);
	match base.rfind('.') {
		Some(n) if n > 0 => &base[..n],
		_ => base,
	}
}

/// The extension of the last component of `path`, without the dot.
///
/// Empty if there is none. Hidden files (`.profile`) have no extension.
pub fn extension(path: &str) -> &str {
	let base = base_name(path);
	match base.rfind('.') {
		Some(n) if n > 0 => &base[n + 1..],
		_ => "",
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	#[rustfmt::skip]
	fn test_normalize() {
		assert_eq!(normalize(""), "");
		assert_eq!(normalize("hello"), "hello");
		assert_eq!(normalize("./hello"), "hello");
		assert_eq!(normalize("foo/./bar/baz"), "foo/bar/baz");
		assert_eq!(normalize("foo/bar/baz/./."), "foo/bar/baz");
		assert_eq!(normalize("/./foo/bar/baz"), "/foo/bar/baz");
		assert_eq!(normalize("foo/../baz"), "baz");
		assert_eq!(normalize("foo/.ok"), "foo/.ok");
		assert_eq!(normalize(".//foo///bar////..//baz////blah.x"), "foo/baz/blah.x");
		assert_eq!(normalize("./."), ".");
		assert_eq!(normalize("/."), "/");
		assert_eq!(normalize("foo/.."), ".");
		assert_eq!(normalize("/foo/../"), "/");
		assert_eq!(normalize("/../foo"), "/foo");
		assert_eq!(normalize("../foo/../"), "..");
		assert_eq!(normalize("foo/../../test"), "../test");
		assert_eq!(normalize("../x/a/b/../c/../.."), "../x");
	}

	#[test]
	#[rustfmt::skip]
	fn test_components() {
		assert_eq!(dir_name("/libs/libfoo.a"), "/libs");
		assert_eq!(dir_name("/libfoo.a"), "/");
		assert_eq!(dir_name("libfoo.a"), ".");
		assert_eq!(base_name("/libs/libfoo.a"), "libfoo.a");
		assert_eq!(base_name("libfoo.a"), "libfoo.a");
		assert_eq!(base_name_without_extension("/Frameworks/Foo.framework"), "Foo");
		assert_eq!(base_name_without_extension("/a/archive.tar.gz"), "archive.tar");
		assert_eq!(base_name_without_extension("/home/.profile"), ".profile");
		assert_eq!(extension("main.c"), "c");
		assert_eq!(extension("/a.b/Makefile"), "");
		assert_eq!(extension(".profile"), "");
	}

	#[test]
	fn test_resolve_relative() {
		assert_eq!(resolve_relative("a.o", "/build"), "/build/a.o");
		assert_eq!(resolve_relative("../src/a.c", "/build/obj"), "/build/src/a.c");
		assert_eq!(resolve_relative("/abs/./a.o", "/build"), "/abs/a.o");
		assert_eq!(resolve_relative("rel/a.o", ""), "rel/a.o");
	}
}
