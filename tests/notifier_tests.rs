//! Event fan-out contract, checked with mock observers

use std::sync::Arc;

use mockall::mock;

use biblion_server::services::notifier::{EventNotifier, LibraryObserver};

mock! {
    pub Observer {}

    impl LibraryObserver for Observer {
        fn on_event(&self, message: &str);
    }
}

#[test]
fn every_observer_receives_each_message() {
    let notifier = EventNotifier::new();

    let mut first = MockObserver::new();
    first
        .expect_on_event()
        .withf(|message: &str| message.contains("overdue"))
        .times(1)
        .return_const(());
    let mut second = MockObserver::new();
    second
        .expect_on_event()
        .withf(|message: &str| message.contains("overdue"))
        .times(1)
        .return_const(());

    notifier.subscribe(Arc::new(first));
    notifier.subscribe(Arc::new(second));
    notifier.notify("loan overdue");
}

#[test]
fn unsubscribed_observer_hears_nothing() {
    let notifier = EventNotifier::new();

    let mut observer = MockObserver::new();
    observer.expect_on_event().times(1).return_const(());
    let handle: Arc<dyn LibraryObserver> = Arc::new(observer);

    notifier.subscribe(handle.clone());
    notifier.notify("first");

    assert!(notifier.unsubscribe(&handle));
    notifier.notify("second");
}
