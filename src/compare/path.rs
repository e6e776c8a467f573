use std::fmt;

/// Location of a node in a JSON document, from the root down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path<'a> {
    Root,
    Keys(Vec<Key<'a>>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key<'a> {
    Idx(usize),
    Field(&'a str),
}

impl<'a> fmt::Display for Key<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Idx(idx) => write!(f, "[{}]", idx),
            Key::Field(key) => write!(f, ".{}", key),
        }
    }
}

impl<'a> Path<'a> {
    pub(crate) fn append(&self, next: Key<'a>) -> Path<'a> {
        match self {
            Path::Root => Path::Keys(vec![next]),
            Path::Keys(list) => {
                let mut copy = list.clone();
                copy.push(next);
                Path::Keys(copy)
            }
        }
    }

    /// The keys leading to the node, outermost first. Empty at the root.
    pub fn segments(&self) -> &[Key<'a>] {
        match self {
            Path::Root => &[],
            Path::Keys(list) => list,
        }
    }
}

impl<'a> fmt::Display for Path<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Path::Root => write!(f, "(root)"),
            Path::Keys(keys) => {
                for key in keys {
                    write!(f, "{}", key)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_append() {
        let path = Path::Root.append(Key::Field("user"));
        let path = path.append(Key::Idx(3));
        let path = path.append(Key::Field("name"));
        assert_eq!(
            path,
            Path::Keys(vec![Key::Field("user"), Key::Idx(3), Key::Field("name")])
        );
    }

    #[test]
    fn test_append_leaves_receiver_unchanged() {
        let base = Path::Root.append(Key::Field("a"));
        let _ = base.append(Key::Field("b"));
        assert_eq!(base, Path::Keys(vec![Key::Field("a")]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::Root.to_string(), "(root)");

        let path = Path::Root
            .append(Key::Field("user"))
            .append(Key::Field("comments"))
            .append(Key::Idx(2))
            .append(Key::Field("id"));
        assert_eq!(path.to_string(), ".user.comments[2].id");
    }

    #[test]
    fn test_segments() {
        assert_eq!(Path::Root.segments(), &[]);

        let path = Path::Root.append(Key::Field("a")).append(Key::Idx(0));
        assert_eq!(path.segments(), &[Key::Field("a"), Key::Idx(0)]);
    }
}
