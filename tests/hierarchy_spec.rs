use org_chart::app::OrgChart;
use org_chart::db::{Database, TreeStore};
use org_chart::document;
use org_chart::error::OrgError;
use org_chart::hierarchy::{self, tree};
use org_chart::models::*;
use speculate2::speculate;

const PASSWORD: &str = "admin123";

fn lead_only_tree() -> OrgNode {
    OrgNode::new("m", "M", NodeRole::Manager)
        .with_children(vec![OrgNode::new("L", "L", NodeRole::Lead)])
}

fn team_tree() -> OrgNode {
    OrgNode::new("m", "M", NodeRole::Manager).with_children(vec![
        OrgNode::new("l1", "Lead One", NodeRole::Lead).with_children(vec![
            OrgNode::new("a", "Ann", NodeRole::Member),
            OrgNode::new("b", "Bob", NodeRole::Member),
            OrgNode::new("c", "Cy", NodeRole::Member),
        ]),
        OrgNode::new("l2", "Lead Two", NodeRole::Lead)
            .with_children(vec![OrgNode::new("d", "Dee", NodeRole::Member)]),
    ])
}

fn open_store() -> Database {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    db
}

fn admin_chart(root: OrgNode, store: Database) -> OrgChart {
    let mut chart = OrgChart::new(root, Box::new(store), PASSWORD);
    chart.login(PASSWORD).expect("Login failed");
    chart
}

fn child_ids(node: &OrgNode) -> Vec<String> {
    node.children.iter().map(|c| c.id.clone()).collect()
}

speculate! {
    before {
        let store = open_store();
    }

    describe "scenarios" {
        it "adds a member and undoes it" {
            let mut chart = admin_chart(lead_only_tree(), store.clone());

            chart.add_member("L", "Alice").expect("Add failed");
            let lead = tree::find_node(chart.tree(), "L").unwrap();
            assert_eq!(lead.children.len(), 1);
            assert_eq!(lead.children[0].role, NodeRole::Member);
            assert_eq!(lead.children[0].name, "Alice");

            assert!(chart.undo().expect("Undo failed"));
            assert!(tree::find_node(chart.tree(), "L").unwrap().children.is_empty());
        }

        it "leaves the tree unchanged when moving the first child up" {
            let mut chart = admin_chart(team_tree(), store.clone());

            chart.reorder_sibling("l1", MoveDirection::Up).expect("Reorder failed");
            assert_eq!(*chart.tree(), team_tree());
            assert!(!chart.history_status().can_undo);
        }

        it "rejects importing a document rooted at a lead" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.add_member("l2", "Eve").expect("Add failed");
            chart.undo().expect("Undo failed");
            let before_tree = chart.tree().clone();
            let before_history = chart.history_status();

            let err = chart
                .import(r#"{"id":"x","name":"X","role":"Lead","children":[]}"#)
                .unwrap_err();

            assert!(matches!(err, OrgError::ImportFormat(_)));
            assert_eq!(*chart.tree(), before_tree);
            assert_eq!(chart.history_status(), before_history);
        }

        it "deletes a lead with its members and restores them in order on undo" {
            let mut chart = admin_chart(team_tree(), store.clone());

            chart.delete_node("l1").expect("Delete failed");
            for id in ["l1", "a", "b", "c"] {
                assert!(tree::find_node(chart.tree(), id).is_none());
            }

            chart.undo().expect("Undo failed");
            let lead = tree::find_node(chart.tree(), "l1").unwrap();
            assert_eq!(child_ids(lead), vec!["a", "b", "c"]);
            assert_eq!(*chart.tree(), team_tree());
        }

        it "returns to the first commit after undo undo redo" {
            let mut chart = admin_chart(team_tree(), store.clone());

            chart.rename("a", "Annie").expect("Rename failed");
            let after_a = chart.tree().clone();
            chart.rename("b", "Bobby").expect("Rename failed");

            chart.undo().expect("Undo failed");
            chart.undo().expect("Undo failed");
            chart.redo().expect("Redo failed");

            assert_eq!(*chart.tree(), after_a);
        }
    }

    describe "history" {
        it "satisfies the undo redo inverse law" {
            let mut chart = admin_chart(team_tree(), store.clone());
            let t = chart.tree().clone();

            chart.move_member("a", "l2").expect("Move failed");
            let f_t = chart.tree().clone();

            chart.undo().expect("Undo failed");
            assert_eq!(*chart.tree(), t);
            chart.redo().expect("Redo failed");
            assert_eq!(*chart.tree(), f_t);
        }

        it "truncates redo on a fresh commit" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.add_lead("m", "Lead Three").expect("Add failed");
            chart.undo().expect("Undo failed");
            assert!(chart.history_status().can_redo);

            chart.add_member("l2", "Fay").expect("Add failed");
            assert!(!chart.history_status().can_redo);
            assert!(!chart.redo().expect("Redo failed"));
        }

        it "does not record expand and collapse" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.toggle_expand("l1").expect("Toggle failed");
            chart.set_expanded("l2", false).expect("Collapse failed");

            assert_eq!(chart.history_status(), HistoryStatus::default());
            assert!(!tree::find_node(chart.tree(), "l1").unwrap().is_expanded());
        }

        it "counts a valid import as one undoable step" {
            let mut chart = admin_chart(team_tree(), store.clone());
            let text = document::serialize_pretty(&lead_only_tree()).unwrap();

            chart.import(&text).expect("Import failed");
            assert_eq!(*chart.tree(), lead_only_tree());
            assert_eq!(chart.history_status().undo_depth, 1);

            chart.undo().expect("Undo failed");
            assert_eq!(*chart.tree(), team_tree());
        }

        it "counts importing the current chart as a step and drops redo" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.add_member("l2", "Eve").expect("Add failed");
            chart.undo().expect("Undo failed");
            let before = chart.history_status();
            assert!(before.can_redo);

            let text = document::serialize(chart.tree()).unwrap();
            chart.import(&text).expect("Import failed");

            let after = chart.history_status();
            assert_eq!(after.undo_depth, before.undo_depth + 1);
            assert!(!after.can_redo);
            assert_eq!(*chart.tree(), team_tree());
        }

        it "is wiped by logout" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.rename("a", "A2").expect("Rename failed");
            chart.rename("a", "A3").expect("Rename failed");
            chart.undo().expect("Undo failed");

            chart.logout();
            chart.login(PASSWORD).expect("Login failed");

            assert_eq!(chart.history_status(), HistoryStatus::default());
            assert_eq!(tree::find_node(chart.tree(), "a").unwrap().name, "A2");
        }
    }

    describe "permissions" {
        it "rejects every edit from a viewer" {
            let mut chart = OrgChart::new(team_tree(), Box::new(store.clone()), PASSWORD);

            assert_eq!(chart.rename("a", "x").map(|_| ()), Err(OrgError::PermissionDenied));
            assert_eq!(chart.add_lead("m", "x").map(|_| ()), Err(OrgError::PermissionDenied));
            assert_eq!(chart.add_member("l1", "x").map(|_| ()), Err(OrgError::PermissionDenied));
            assert_eq!(chart.delete_node("a").map(|_| ()), Err(OrgError::PermissionDenied));
            assert_eq!(chart.toggle_expand("l1").map(|_| ()), Err(OrgError::PermissionDenied));
            assert_eq!(
                chart.reorder_sibling("b", MoveDirection::Up).map(|_| ()),
                Err(OrgError::PermissionDenied)
            );
            assert_eq!(chart.move_member("a", "l2").map(|_| ()), Err(OrgError::PermissionDenied));
            assert_eq!(chart.undo(), Err(OrgError::PermissionDenied));
            assert_eq!(*chart.tree(), team_tree());
        }

        it "keeps the viewer role after a wrong password" {
            let mut chart = OrgChart::new(team_tree(), Box::new(store.clone()), PASSWORD);
            assert!(chart.login("wrong").is_err());
            assert_eq!(chart.role(), UserRole::Viewer);
        }

        it "still allows viewers to export" {
            let chart = OrgChart::new(team_tree(), Box::new(store.clone()), PASSWORD);
            let text = chart.export().expect("Export failed");
            assert_eq!(document::deserialize(&text).unwrap(), team_tree());
        }
    }

    describe "invariants" {
        it "hold across a long sequence of edits" {
            let mut chart = admin_chart(team_tree(), store.clone());

            chart.add_lead("m", "Lead Three").expect("Add failed");
            let l3 = chart.tree().children.last().unwrap().id.clone();
            chart.add_member(&l3, "Gus").expect("Add failed");
            chart.add_member(&l3, "Hal").expect("Add failed");
            chart.move_member("b", &l3).expect("Move failed");
            chart.reorder_sibling(&l3, MoveDirection::Up).expect("Reorder failed");
            chart.rename("c", "Cyrus").expect("Rename failed");
            chart.delete_node("l2").expect("Delete failed");
            chart.toggle_expand(&l3).expect("Toggle failed");
            chart.undo().expect("Undo failed");
            chart.redo().expect("Redo failed");

            assert!(hierarchy::validate(chart.tree()).is_ok());
            assert!(chart.add_lead(&l3, "Nope").is_err());
            assert!(chart.add_member("m", "Nope").is_err());
            assert!(chart.move_member(&l3, "l1").is_err());
            assert!(chart.delete_node("m").is_err());
            assert!(hierarchy::validate(chart.tree()).is_ok());
        }

        it "places a moved member exactly once under its new lead" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.move_member("a", "l2").expect("Move failed");

            let root = chart.tree();
            assert_eq!(root.ids().iter().filter(|id| **id == "a").count(), 1);
            assert_eq!(tree::find_parent(root, "a").unwrap().id, "l2");
            assert!(!child_ids(tree::find_node(root, "l1").unwrap()).contains(&"a".to_string()));
            assert_eq!(tree::find_node(root, "l2").unwrap().expanded, Some(true));
        }

        it "leaves the tree equal when updating a missing id" {
            let root = team_tree();
            for id in ["", "zzz", "A", "l3"] {
                assert_eq!(tree::update_node(&root, id, NodePatch::name("x")), root);
            }
        }
    }

    describe "persistence" {
        it "writes every commit and toggle to the store" {
            let mut chart = admin_chart(team_tree(), store.clone());

            chart.add_member("l2", "Eve").expect("Add failed");
            assert_eq!(store.load_tree().unwrap().as_ref(), Some(chart.tree()));

            chart.toggle_expand("l2").expect("Toggle failed");
            assert_eq!(store.load_tree().unwrap().as_ref(), Some(chart.tree()));

            chart.undo().expect("Undo failed");
            assert_eq!(store.load_tree().unwrap().as_ref(), Some(chart.tree()));
            assert!(chart.persistence_warning().is_none());
        }

        it "reloads the saved chart on the next start" {
            let mut chart = admin_chart(team_tree(), store.clone());
            chart.rename("d", "Dora").expect("Rename failed");
            let saved = chart.tree().clone();
            drop(chart);

            let reopened = OrgChart::load(Box::new(store.clone()), PASSWORD).expect("Load failed");
            assert_eq!(*reopened.tree(), saved);
            assert_eq!(reopened.role(), UserRole::Viewer);
        }
    }
}
