use studybuddy_core::contact::ContactForm;
use studybuddy_core::StudyBuddy;

use super::print_toast;

pub async fn run_contact(app: &StudyBuddy, form: &ContactForm) -> bool {
    let result = app.contact.submit(form).await;
    print_toast(app);
    result.is_completed()
}
