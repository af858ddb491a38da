use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    Image(usize),
    ImageMask(usize),
}

/// Allocates PDF object ids, remembering which object each was handed out for
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// The id for `ref_type`, allocating one on first use
    pub fn get_or_gen(&mut self, ref_type: RefType) -> Ref {
        if let Some(id) = self.get(ref_type) {
            return id;
        }
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_per_object() {
        let mut refs = ObjectReferences::new();
        let catalog = refs.get_or_gen(RefType::Catalog);
        let page = refs.get_or_gen(RefType::Page(0));
        assert_ne!(catalog, page);
        assert_eq!(refs.get_or_gen(RefType::Page(0)), page);
        assert_eq!(refs.get(RefType::Page(1)), None);
    }
}
