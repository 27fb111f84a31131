#[cfg(test)]
mod tests {
    use crate::session::image::{ImageStatus, WorkshopImage};
    use crate::session::model::{ActiveView, Session};
    use crate::session::report::Report;
    use crate::session::store::SessionStore;

    fn images(n: usize) -> Vec<WorkshopImage> {
        (0..n)
            .map(|i| WorkshopImage::new(format!("note-{i}.jpg"), "image/jpeg", vec![i as u8; 4]))
            .collect()
    }

    async fn store_with_session(n_images: usize) -> (SessionStore, String, Vec<String>) {
        let store = SessionStore::new();
        let mut session = Session::new("Kickoff");
        let imgs = images(n_images);
        let ids = imgs.iter().map(|i| i.id.clone()).collect();
        session.append_images(imgs);
        let session_id = session.id.clone();
        store.insert_session(session).await;
        (store, session_id, ids)
    }

    #[tokio::test]
    async fn test_sessions_are_listed_newest_first() {
        let store = SessionStore::new();
        let first = Session::new("First");
        let second = Session::new("Second");
        let (first_id, second_id) = (first.id.clone(), second.id.clone());

        store.insert_session(first).await;
        store.insert_session(second).await;

        let ids: Vec<String> = store.sessions().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second_id, first_id]);
    }

    #[tokio::test]
    async fn test_status_updates_do_not_reorder_images() {
        let (store, session_id, ids) = store_with_session(4).await;

        // Finish images in reverse order.
        for id in ids.iter().rev() {
            store
                .update_image(&session_id, id, |img| {
                    img.begin_analysis()?;
                    img.complete_analysis(format!("desc {id}"))
                })
                .await
                .unwrap()
                .unwrap();
        }

        let session = store.session(&session_id).await.unwrap();
        let order: Vec<String> = session.images.iter().map(|i| i.id.clone()).collect();
        assert_eq!(order, ids);
        assert!(session.images.iter().all(|i| i.status == ImageStatus::Done));
    }

    #[tokio::test]
    async fn test_update_for_unknown_ids_is_noop() {
        let (store, session_id, ids) = store_with_session(1).await;

        let missing_session = store.update_session("missing", |s| s.title.clear()).await;
        assert!(missing_session.is_none());

        let mut called = false;
        let missing_image = store
            .update_image(&session_id, "missing", |_| called = true)
            .await;
        assert!(missing_image.is_none());
        assert!(!called);

        let session = store.session(&session_id).await.unwrap();
        assert_eq!(session.title, "Kickoff");
        assert_eq!(session.images[0].id, ids[0]);
    }

    #[tokio::test]
    async fn test_delete_session_cascades_and_clears_selection() {
        let (store, session_id, ids) = store_with_session(2).await;
        store
            .update_session(&session_id, |s| s.set_report(Report::new("# Report")))
            .await
            .unwrap();
        store.set_active_session(Some(&session_id)).await.unwrap();
        store.set_active_view(ActiveView::Report).await;

        assert!(store.delete_session(&session_id).await);

        assert!(store.session(&session_id).await.is_none());
        assert!(store.image(&session_id, &ids[0]).await.is_none());
        assert!(store.active_session_id().await.is_none());
        assert_eq!(store.active_view().await, ActiveView::Photos);
        assert!(store.is_empty().await);

        // Late result for a deleted image
        let late = store
            .update_image(&session_id, &ids[1], |img| img.fail_analysis())
            .await;
        assert!(late.is_none());
        assert!(!store.delete_session(&session_id).await);
    }

    #[tokio::test]
    async fn test_active_session_must_exist() {
        let store = SessionStore::new();
        let err = store.set_active_session(Some("nope")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.active_session().await.is_none());
    }

    #[tokio::test]
    async fn test_insert_active_session_selects_it_on_photos() {
        let store = SessionStore::new();
        store.set_active_view(ActiveView::Report).await;
        let older = Session::new("Older");
        let newer = Session::new("Newer");
        store.insert_session(older.clone()).await;

        store.insert_active_session(newer.clone()).await;

        assert_eq!(store.active_session_id().await, Some(newer.id.clone()));
        assert_eq!(store.active_view().await, ActiveView::Photos);
        let ids: Vec<String> = store.sessions().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_clear_active_session_keeps_sessions() {
        let store = SessionStore::new();
        store.insert_active_session(Session::new("Retro")).await;

        store.clear_active_session().await;

        assert!(store.active_session_id().await.is_none());
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_active_view_switch_only_for_active_session() {
        let (store, session_id, _) = store_with_session(0).await;
        assert!(!store.set_active_view_for(&session_id, ActiveView::Report).await);
        assert_eq!(store.active_view().await, ActiveView::Photos);

        store.set_active_session(Some(&session_id)).await.unwrap();
        assert!(store.set_active_view_for(&session_id, ActiveView::Report).await);
        assert_eq!(store.active_view().await, ActiveView::Report);
    }

    #[tokio::test]
    async fn test_concurrent_updates_to_different_images_do_not_interfere() {
        let (store, session_id, ids) = store_with_session(2).await;

        let a = {
            let store = store.clone();
            let (sid, iid) = (session_id.clone(), ids[0].clone());
            tokio::spawn(async move {
                store
                    .update_image(&sid, &iid, |img| {
                        img.begin_analysis()?;
                        img.complete_analysis("X".to_string())
                    })
                    .await
            })
        };
        let b = {
            let store = store.clone();
            let (sid, iid) = (session_id.clone(), ids[1].clone());
            tokio::spawn(async move {
                store
                    .update_image(&sid, &iid, |img| {
                        img.begin_analysis()?;
                        img.fail_analysis()
                    })
                    .await
            })
        };
        a.await.unwrap().unwrap().unwrap();
        b.await.unwrap().unwrap().unwrap();

        let session = store.session(&session_id).await.unwrap();
        assert_eq!(session.images[0].status, ImageStatus::Done);
        assert_eq!(session.images[0].description.as_deref(), Some("X"));
        assert_eq!(session.images[1].status, ImageStatus::Error);
        assert!(session.images[1].description.is_none());
    }
}
