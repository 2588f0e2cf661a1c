//! User-facing text.

pub const SESSION_STARTED: &str = "Тренування розпочато! Надсилайте вправи у форматі:\n\
• 'Зробив 20 відтискань'\n\
• 'Присідання 30 разів з вагою 20 кг'\n\
• '15 підтягувань'\n\
• 'Жим лежачи 12 повторів з вагою 80 кг'\n\n\
Додавайте їх командою: repcount add <текст>";

pub const NO_ACTIVE_SESSION: &str =
    "Щоб надсилати вправи, спершу розпочніть тренування: repcount start";

pub const NOTHING_TO_STOP: &str =
    "Ви ще не почали тренування. Виконайте repcount start, щоб почати.";

pub const NOT_RECOGNISED: &str = "Не вдалося розпізнати повідомлення.\nСпробуйте ще раз.";

pub const NOT_AN_EXERCISE: &str = "Повідомлення не схоже на опис вправи.\n\
Надішліть у форматі:\n\
• 'Зробив 15 підтягувань'\n\
• 'Відтискання 20 разів'\n\
• 'Присідання 30 разів з вагою 20 кг'";

pub const RECORDED: &str = "✅ Записано:";

pub const SESSION_FINISHED: &str = "Тренування завершено! Ви зробили:";

pub const SESSION_FINISHED_EMPTY: &str = "Тренування завершено! Ви не додали жодної вправи.";

pub const NO_FINISHED_SESSIONS: &str = "Ви ще не маєте завершених тренувань.\n\
Виконайте repcount start, щоб почати перше тренування.";

pub const LAST_SESSION_EMPTY: &str = "Останнє тренування не містить вправ.";

pub const LAST_SESSION: &str = "📊 Останнє тренування";

pub const STATS_HEADER: &str = "📈 Статистика:";

pub const STATS_TOP: &str = "🏆 Топ-3 вправи:";
