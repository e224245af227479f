//! Integration tests for inheritable page attributes.

use pdf_page_tree::page_tree::{find_inherited, InheritableAttribute};
use pdf_page_tree::{Dictionary, Error, Object, ObjectStore, PageTreeNode, Rectangle, Resources};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// root -> group -> [page, page]
struct Tree {
    root: PageTreeNode,
    group: PageTreeNode,
    pages: Vec<PageTreeNode>,
}

fn build_tree(store: &mut ObjectStore) -> Tree {
    let root = PageTreeNode::new_pages(store).unwrap();
    let group = PageTreeNode::new_pages(store).unwrap();
    root.append_child(store, group).unwrap();
    let mut pages = Vec::new();
    for _ in 0..2 {
        let page = PageTreeNode::new_page(store).unwrap();
        group.append_child(store, page).unwrap();
        pages.push(page);
    }
    root.update_count(store).unwrap();
    Tree { root, group, pages }
}

fn font_resources(name: &str) -> Resources {
    let mut fonts = Dictionary::new();
    fonts.insert(name.to_string(), Object::name("Helvetica"));
    let mut resources = Resources::new();
    resources.insert("Font", fonts);
    resources
}

mod media_box_tests {
    use super::*;

    #[test]
    fn test_root_media_box_reaches_every_page() {
        init_logging();
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let letter = Rectangle::from_dimensions(612.0, 792.0);
        tree.root.set_media_box(&mut store, Some(letter)).unwrap();

        for node in tree.root.all_leaves(&store, true).unwrap() {
            assert_eq!(node.find_media_box(&store).unwrap(), Some(letter));
            let found = find_inherited(&store, node, InheritableAttribute::MediaBox)
                .unwrap()
                .unwrap();
            assert_eq!(found.source, tree.root);
        }
        assert_eq!(tree.group.find_media_box(&store).unwrap(), Some(letter));
    }

    #[test]
    fn test_nearest_declaration_wins() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let letter = Rectangle::from_dimensions(612.0, 792.0);
        let a5 = Rectangle::from_dimensions(420.0, 595.0);
        tree.root.set_media_box(&mut store, Some(letter)).unwrap();
        tree.pages[1].set_media_box(&mut store, Some(a5)).unwrap();

        assert_eq!(tree.pages[0].find_media_box(&store).unwrap(), Some(letter));
        assert_eq!(tree.pages[1].find_media_box(&store).unwrap(), Some(a5));
    }

    #[test]
    fn test_removing_override_reexposes_ancestor() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let letter = Rectangle::from_dimensions(612.0, 792.0);
        let a5 = Rectangle::from_dimensions(420.0, 595.0);
        tree.root.set_media_box(&mut store, Some(letter)).unwrap();
        tree.group.set_media_box(&mut store, Some(a5)).unwrap();
        assert_eq!(tree.pages[0].find_media_box(&store).unwrap(), Some(a5));

        tree.group.set_media_box(&mut store, None).unwrap();
        assert_eq!(tree.pages[0].find_media_box(&store).unwrap(), Some(letter));
    }

    #[test]
    fn test_malformed_media_box_is_an_error() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        store
            .set_field(tree.root.dict_ref(), "MediaBox", Object::Integer(0))
            .unwrap();
        assert!(matches!(
            tree.pages[0].find_media_box(&store),
            Err(Error::InvalidObjectType { .. })
        ));
    }

    #[test]
    fn test_indirect_media_box() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let boxed = store.add(Rectangle::from_dimensions(100.0, 200.0).to_object()).unwrap();
        store
            .set_field(tree.root.dict_ref(), "MediaBox", boxed)
            .unwrap();
        assert_eq!(
            tree.pages[0].find_media_box(&store).unwrap(),
            Some(Rectangle::from_dimensions(100.0, 200.0))
        );
    }
}

mod crop_box_tests {
    use super::*;

    #[test]
    fn test_crop_box_defaults_to_media_box() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let letter = Rectangle::from_dimensions(612.0, 792.0);
        tree.root.set_media_box(&mut store, Some(letter)).unwrap();

        assert!(tree.pages[0].crop_box(&store).unwrap().is_none());
        assert_eq!(tree.pages[0].find_crop_box(&store).unwrap(), Some(letter));
    }

    #[test]
    fn test_crop_box_default_uses_nearest_media_box() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let letter = Rectangle::from_dimensions(612.0, 792.0);
        let small = Rectangle::from_dimensions(300.0, 300.0);
        tree.root.set_media_box(&mut store, Some(letter)).unwrap();
        tree.pages[0].set_media_box(&mut store, Some(small)).unwrap();

        assert_eq!(tree.pages[0].find_crop_box(&store).unwrap(), Some(small));
        assert_eq!(tree.pages[1].find_crop_box(&store).unwrap(), Some(letter));
    }

    #[test]
    fn test_ancestor_crop_box_beats_media_box() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        let crop = Rectangle::new(36.0, 36.0, 576.0, 756.0);
        tree.root.set_crop_box(&mut store, Some(crop)).unwrap();
        tree.group
            .set_media_box(&mut store, Some(Rectangle::from_dimensions(612.0, 792.0)))
            .unwrap();

        assert_eq!(tree.pages[1].find_crop_box(&store).unwrap(), Some(crop));
    }

    #[test]
    fn test_no_boxes_anywhere() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        assert!(tree.pages[0].find_crop_box(&store).unwrap().is_none());
    }
}

mod rotation_tests {
    use super::*;

    #[test]
    fn test_default_rotation_is_zero() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        for page in &tree.pages {
            assert_eq!(page.find_rotation(&store).unwrap(), 0);
        }
    }

    #[test]
    fn test_group_rotation_is_inherited() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        tree.group.set_rotation(&mut store, Some(90)).unwrap();
        tree.pages[1].set_rotation(&mut store, Some(180)).unwrap();

        assert_eq!(tree.pages[0].find_rotation(&store).unwrap(), 90);
        assert_eq!(tree.pages[1].find_rotation(&store).unwrap(), 180);
        assert_eq!(tree.root.find_rotation(&store).unwrap(), 0);
    }

    #[test]
    fn test_rotation_is_not_validated() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        tree.root.set_rotation(&mut store, Some(45)).unwrap();
        assert_eq!(tree.pages[0].find_rotation(&store).unwrap(), 45);
    }

    #[test]
    fn test_oversized_rotation_is_an_error() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        store
            .set_field(tree.root.dict_ref(), "Rotate", Object::Integer((1i64 << 32) + 90))
            .unwrap();
        assert!(matches!(
            tree.pages[0].find_rotation(&store),
            Err(Error::InvalidObjectType { .. })
        ));
    }

    #[test]
    fn test_non_finite_rotation_is_an_error() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        store
            .set_field(tree.group.dict_ref(), "Rotate", Object::Real(f64::NAN))
            .unwrap();
        assert!(matches!(
            tree.pages[1].find_rotation(&store),
            Err(Error::InvalidObjectType { .. })
        ));
    }
}

mod resources_tests {
    use super::*;

    #[test]
    fn test_resources_are_not_merged() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        tree.root
            .set_resources(&mut store, Some(font_resources("F1")))
            .unwrap();
        let mut local = Resources::new();
        local.insert("XObject", Dictionary::new());
        tree.pages[0]
            .set_resources(&mut store, Some(local.clone()))
            .unwrap();

        let found = tree.pages[0].find_resources(&store).unwrap().unwrap();
        assert_eq!(found, local);
        assert!(!found.contains("Font"));

        let inherited = tree.pages[1].find_resources(&store).unwrap().unwrap();
        assert_eq!(inherited, font_resources("F1"));
    }

    #[test]
    fn test_missing_resources() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        assert!(tree.pages[0].find_resources(&store).unwrap().is_none());
    }

    #[test]
    fn test_inherited_dictionary_for_export() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        tree.root
            .set_resources(&mut store, Some(font_resources("F1")))
            .unwrap();
        tree.group.set_rotation(&mut store, Some(270)).unwrap();

        let dict = tree.pages[0].inherited_dictionary(&store).unwrap();
        assert_eq!(dict.get("Rotate"), Some(&Object::Integer(270)));
        assert_eq!(
            dict.get("Resources"),
            Some(&Object::from(font_resources("F1")))
        );
        assert_eq!(dict.get("Type"), Some(&Object::name("Page")));
    }
}

mod cycle_tests {
    use super::*;

    #[test]
    fn test_parent_cycle_fails_cleanly() {
        init_logging();
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        // Close the loop: the root now claims the page as its parent.
        tree.root.set_parent(&mut store, tree.pages[0]).unwrap();

        assert!(matches!(
            tree.pages[0].find_rotation(&store),
            Err(Error::CircularReference(_))
        ));
        assert!(matches!(
            tree.pages[0].find_resources(&store),
            Err(Error::CircularReference(_))
        ));
    }

    #[test]
    fn test_cycle_above_declaration_is_not_reached() {
        let mut store = ObjectStore::new();
        let tree = build_tree(&mut store);
        tree.root.set_parent(&mut store, tree.pages[0]).unwrap();
        tree.group.set_rotation(&mut store, Some(90)).unwrap();

        assert_eq!(tree.pages[0].find_rotation(&store).unwrap(), 90);
    }
}
